pub mod dialogs;
pub mod documents;
pub mod result_tree;
pub mod search_bar;
