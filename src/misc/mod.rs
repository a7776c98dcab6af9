mod color_mode;
mod package_files;
mod package_name;

pub use color_mode::ColorMode;
pub use package_files::{PACKAGE_JSON, PACKAGE_LOCK, RULE_SET, YARN_LOCK, project_dir, read_optional, read_required};
pub use package_name::is_valid_package_name;
