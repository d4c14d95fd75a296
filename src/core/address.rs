use serde_json::Value;

use super::frontmatter::Metadata;

pub const ADDRESS_PREFIX: &str = "0x";

/// Address implied by the directory holding `rel_path`, if its name looks like one.
pub fn derive_address(rel_path: &str) -> Option<&str> {
    rel_path
        .rsplit('/')
        .nth(1)
        .filter(|dir| dir.starts_with(ADDRESS_PREFIX))
}

/// Set `metadata.address` from the containing directory, replacing any front matter value.
pub fn apply_address(metadata: &mut Metadata, rel_path: &str) {
    if let Some(address) = derive_address(rel_path) {
        metadata.insert("address".to_string(), Value::String(address.to_string()));
    }
}
