//! # Sky Map Backend
//!
//! Interactive sky map: apparent positions of the Sun, Moon, planets and
//! naked-eye stars for an observer, drawn on a horizon-centred polar chart.
//!
//! ## Architecture
//!
//! - [`models`]: Domain types (observer, instant, bodies, catalogue entries)
//! - [`astro`]: siderust-backed ephemeris and atmospheric refraction
//! - [`catalog`]: In-memory star catalogue and the Hipparcos reader
//! - [`engine`]: Position Engine and the ephemeris provider seam
//! - [`services`]: Location table, request handling and chart rendering
//! - [`routes`] / [`api`]: Data Transfer Objects for API responses
//! - [`http`]: Axum-based HTTP server and request handlers
//!
//! ## Example
//!
//! ```no_run
//! use skymap::config::SkyMapConfig;
//! use skymap::services::{SkyMapRequest, SkyMapService};
//!
//! let service = SkyMapService::from_config(&SkyMapConfig::default())?;
//! let chart = service.sky_map(&SkyMapRequest::new("London", "2024-06-21", 22))?;
//! println!("{} traces", chart.data.len());
//! # Ok::<(), skymap::error::SkyMapError>(())
//! ```

pub mod api;
pub mod astro;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;

pub mod routes;

pub mod services;

#[cfg(feature = "http-server")]
pub mod http;

pub use error::{SkyMapError, SkyMapResult};
