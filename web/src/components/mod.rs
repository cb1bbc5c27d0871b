pub mod calendar;
pub mod class_picker;
pub mod event_detail;
pub mod event_form;
pub mod nav;
pub mod notice;
pub mod stats_panel;
