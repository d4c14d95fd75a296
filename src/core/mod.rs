pub mod address;
pub mod collate;
pub mod entry;
pub mod error;
pub mod frontmatter;
pub mod index;
pub mod metrics;
pub mod paths;
pub mod scan;
pub mod yaml;
