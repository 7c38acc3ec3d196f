// src/gui/router.rs
use super::pages::{ self, Page };

pub static PAGES: &[&'static dyn Page] = &[
    &pages::register::PAGE,
    &pages::carrier::PAGE,
];

pub fn all_pages() -> &'static [&'static dyn Page] {
    PAGES
}
