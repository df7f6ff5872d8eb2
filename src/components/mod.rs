pub mod flow_editor;
pub mod side_panel;
pub mod top_bar;
