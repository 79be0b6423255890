//! Salesboard - E-commerce sales analytics
//!
//! This library loads the six CSV tables of an e-commerce export, merges
//! them into one sales dataset and computes revenue, product, geographic
//! and customer-experience metrics over it. Results are printed as a
//! console summary, rendered to SVG charts or served from a dashboard.
//!
//! # Features
//! - **server**: dashboard HTTP server (default)
//! - **cli**: command-line interface (default)
//!
//! # Architecture
//! - `data`: CSV loading, joins, derived columns and filters
//! - `analytics`: metric aggregators and the console summary
//! - `charts`: SVG rendering with plotters
//! - `services`: period reports shared by the dashboard and the CLI
//! - `api`: HTTP handlers and middleware
//! - `interfaces`: command-line interface
//! - `config`: configuration management
//! - `runtime`: execution modes
//! - `system`: logging setup

pub mod analytics;
#[cfg(feature = "server")]
pub mod api;
pub mod charts;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod data;
pub mod errors;
#[cfg(feature = "cli")]
pub mod interfaces;
#[cfg(feature = "server")]
pub mod runtime;
pub mod services;
pub mod system;
pub mod utils;
