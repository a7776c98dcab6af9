use regex::Regex;
use std::sync::LazyLock;

/// An npm package name, optionally scoped, optionally followed by `@<version or tag>`.
///
/// Mixed case is accepted for the unscoped part since the registry still hosts legacy names
/// such as `JSONStream`.
static NPM_PACKAGE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(@[a-z0-9][a-z0-9._~-]*/)?[A-Za-z0-9][A-Za-z0-9._~-]*(@\S+)?$").expect("package name pattern is valid")
});

/// Check that `name` looks like `package`, `@scope/package`, or either with an `@version` suffix.
#[must_use]
pub fn is_valid_package_name(name: &str) -> bool {
    NPM_PACKAGE_NAME.is_match(name)
}
