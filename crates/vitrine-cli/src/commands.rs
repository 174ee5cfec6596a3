//! Content subcommands: `check`, `list`, `show`, `paths`.
//!
//! Every category is loaded with the product schema ([`ProductMeta`]), the
//! only schema the site defines.

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use vitrine_catalog::{
    CategoryConfig, ContentRepository, Document, DocumentMeta, PageMetadata, ProductMeta,
    static_paths,
};
use vitrine_content::Severity;

use crate::cli::Command;
use crate::config::SiteConfig;
use crate::config_handlers::handle_config_command;
use crate::error::{Error, Result};

/// Length of the summary shown by `show`.
const SUMMARY_CHARS: usize = 160;

/// Run a subcommand against an already loaded `site`.
///
/// `config` actions act on the file `site` was read from.
pub async fn dispatch<W: Write>(site: &SiteConfig, command: Command, out: &mut W) -> Result<()> {
    match command {
        Command::Check => cmd_check(site, out).await,
        Command::List { category, json } => cmd_list(site, &category, json, out).await,
        Command::Show { category, id, json } => cmd_show(site, &category, &id, json, out).await,
        Command::Paths { category } => cmd_paths(site, &category, out).await,
        Command::Config { action } => {
            let source = site.source().and_then(Path::to_str);
            handle_config_command(source, action, out)
        }
    }
}

/// Load every configured category.
pub async fn load_repository(site: &SiteConfig) -> Result<ContentRepository<ProductMeta>> {
    let catalog = site.catalog();
    log::info!("Loading content from {}", catalog.root.display());
    Ok(ContentRepository::load(&catalog, &site.render).await?)
}

fn require_category<'a>(site: &'a SiteConfig, name: &str) -> Result<&'a CategoryConfig> {
    site.category(name).ok_or_else(|| Error::UnknownCategory {
        name: name.to_string(),
        configured: site
            .categories
            .keys()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", "),
    })
}

// ============================================================================
// check
// ============================================================================

/// Load everything and report counts and render warnings.
pub async fn cmd_check<W: Write>(site: &SiteConfig, out: &mut W) -> Result<()> {
    let repo = load_repository(site).await?;

    let mut warnings = 0;
    for category in repo.categories() {
        let documents = repo.list_all(category);
        writeln!(out, "{category}: {} document(s)", documents.len())?;

        for doc in documents {
            for diagnostic in &doc.rendered.diagnostics {
                if diagnostic.severity == Severity::Warning {
                    warnings += 1;
                    writeln!(
                        out,
                        "  warning: {}:{}: {}",
                        doc.source.display(),
                        diagnostic.line,
                        diagnostic.message
                    )?;
                }
            }
        }
    }

    writeln!(out, "ok: {} document(s), {warnings} warning(s)", repo.len())?;
    Ok(())
}

// ============================================================================
// list
// ============================================================================

/// List a category in display order.
pub async fn cmd_list<W: Write>(
    site: &SiteConfig,
    category: &str,
    json: bool,
    out: &mut W,
) -> Result<()> {
    require_category(site, category)?;
    let repo = load_repository(site).await?;
    let documents = repo.list_all(category);

    if json {
        let entries: Vec<&ProductMeta> = documents.iter().map(|d| &d.metadata).collect();
        serde_json::to_writer_pretty(&mut *out, &entries)?;
        writeln!(out)?;
        return Ok(());
    }

    if documents.is_empty() {
        writeln!(out, "No documents in '{category}'")?;
        return Ok(());
    }

    for doc in documents {
        let meta = &doc.metadata;
        writeln!(
            out,
            "{:>4}  {:<28} {:<7} {}",
            meta.order,
            doc.identifier,
            meta.status.label(),
            meta.title
        )?;
    }
    Ok(())
}

// ============================================================================
// show
// ============================================================================

#[derive(Serialize)]
struct ShowOutput<'a> {
    page: PageMetadata,
    document: &'a Document<ProductMeta>,
}

/// Show one document, or fail with a not-found error.
pub async fn cmd_show<W: Write>(
    site: &SiteConfig,
    category: &str,
    id: &str,
    json: bool,
    out: &mut W,
) -> Result<()> {
    require_category(site, category)?;
    let repo = load_repository(site).await?;

    let Some(doc) = repo.get(category, id) else {
        return Err(Error::NotFound {
            kind: ProductMeta::KIND,
            category: category.to_string(),
            id: id.to_string(),
        });
    };
    let page = PageMetadata::for_document(doc, &site.site_name);

    if json {
        serde_json::to_writer_pretty(&mut *out, &ShowOutput {
            page,
            document: doc,
        })?;
        writeln!(out)?;
        return Ok(());
    }

    let meta = &doc.metadata;
    writeln!(out, "{}", page.title)?;
    writeln!(out, "  slug:        {}", doc.identifier)?;
    writeln!(out, "  status:      {}", meta.status.label())?;
    writeln!(out, "  tagline:     {}", meta.tagline)?;
    writeln!(out, "  stack:       {}", meta.stack.join(", "))?;
    writeln!(out, "  order:       {}", meta.order)?;
    writeln!(out, "  model scene: {}", meta.model_scene)?;
    writeln!(out, "  source:      {}", doc.source.display())?;

    if let Some(summary) = doc.summary(SUMMARY_CHARS) {
        writeln!(out, "\n{summary}")?;
    }

    let outline = doc.outline();
    if !outline.is_empty() {
        writeln!(out, "\nOutline:")?;
        for (level, title) in outline {
            let depth = level as usize;
            writeln!(out, "{}- {title}", "  ".repeat(depth))?;
        }
    }

    for diagnostic in &doc.rendered.diagnostics {
        writeln!(
            out,
            "warning: line {}: {}",
            diagnostic.line, diagnostic.message
        )?;
    }
    Ok(())
}

// ============================================================================
// paths
// ============================================================================

/// Print static routes without rendering bodies.
pub async fn cmd_paths<W: Write>(site: &SiteConfig, category: &str, out: &mut W) -> Result<()> {
    let config = require_category(site, category)?;
    let root = site.content_root_path();

    for path in static_paths::<ProductMeta>(category, &root, config).await? {
        writeln!(out, "{}", path.route())?;
    }
    Ok(())
}
