//! Mobile-facing bindings for the GeoRemind core.

pub mod api;
