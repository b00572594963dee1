pub mod classify;
pub mod config;
pub mod data;
pub mod dedup;
pub mod display;
pub mod error;
pub mod ignore;
pub mod matcher;
pub mod merge;
pub mod model;
pub mod normalize;
pub mod pipeline;
pub mod report;

pub use classify::{Classifier, Rule, classify};
pub use config::PatternConfig;
pub use dedup::dedupe_batch;
pub use matcher::mark_duplicates;
pub use merge::merge;
pub use model::{FeedDescriptor, PersistedSourceEntry, SourceCandidate, SourceConfig, SourceType};
pub use pipeline::IngestReport;

pub fn print_banner() {
    let banner = r#"
      _  __ _
  ___(_)/ _| |_
 / __| | |_| __|
 \__ \ |  _| |_
 |___/_|_|  \__|
"#;
    println!("{}", banner);
    println!("  v{} - source intake for newsletters\n", env!("CARGO_PKG_VERSION"));
}
