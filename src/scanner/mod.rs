pub mod core;
pub mod rules;
pub mod text;
pub mod types;

// Re-export main types for easier access
pub use self::core::{CONTENT_SCAN_LIMIT_BYTES, Scanner};
pub use rules::{CompiledRuleSet, ContentPattern, DisallowRule, RuleScope};
pub use text::looks_like_text;
pub use types::{ScanResult, ScanStats, Violation, ViolationKind};
