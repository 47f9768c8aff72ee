pub mod backend;
pub mod cmds;
pub mod config;
pub mod control;
pub mod events;
pub mod locale;
pub mod provider;
pub mod store;
pub mod ui;
