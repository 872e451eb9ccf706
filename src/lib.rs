pub mod admin;
pub mod auth;
pub mod catalog;
pub mod config;
pub mod editor;
pub mod gateway;
pub mod i18n;
pub mod models;
pub mod security;
pub mod web;
