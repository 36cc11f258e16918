//! Data layer: record types, loading, filtering and aggregation.
//!
//! Architecture:
//! ```text
//!  Electric_Vehicle_Population_Data.csv
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse rows, drop rows without a POINT location → Dataset
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  Dataset  │  Vec<VehicleRecord>, city index, range bounds (immutable)
//!   └──────────┘
//!        │
//!        ├──────────────┐
//!        ▼              ▼
//!   ┌──────────┐   ┌───────────┐
//!   │  filter   │   │ aggregate  │  group-by counts, county × CAFV pivot
//!   └──────────┘   └───────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  export   │  table rows → JSON records
//!   └──────────┘
//! ```

pub mod aggregate;
pub mod export;
pub mod filter;
pub mod loader;
pub mod location;
pub mod model;
