mod failures;
mod listing;
mod static_paths;
