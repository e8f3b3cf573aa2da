use std::collections::HashMap;

pub type EnvMap = HashMap<String, String>;

mod loader;

pub use loader::{load_env_file, lookup};
