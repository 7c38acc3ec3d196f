// src/gui/components/mod.rs
pub mod carrier_card;
pub mod data_table;
pub mod date_panel;
pub mod export_bar;
pub mod filter_bar;
pub mod scrape_bar;
pub mod tabs;
