pub mod blockquote;
pub mod checklist_item;
pub mod code_block;
pub mod horizontal_rule;
pub mod list_item;
pub mod paragraph;
pub mod title;

pub use blockquote::Blockquote;
pub use checklist_item::{ChecklistItem, Completion};
pub use code_block::CodeBlock;
pub use horizontal_rule::HorizontalRule;
pub use list_item::ListItem;
pub use paragraph::Paragraph;
pub use title::Title;
