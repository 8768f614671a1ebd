pub mod filter;
pub mod options;
pub mod pagination;
pub mod pipeline;
pub mod query;
pub mod selection;
pub mod share_link;

pub use filter::{FilterKey, FilterState};
pub use options::NamedOption;
pub use pagination::{Paginator, ScrollMetrics};
pub use pipeline::CatalogPipeline;
pub use query::QueryBuilder;
pub use selection::SelectionSet;
pub use share_link::{ShareLink, ShareLinkRequest};
