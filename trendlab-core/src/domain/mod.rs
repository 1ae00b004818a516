//! Domain types: bars, orders, fills, positions, trades, contracts.

pub mod bar;
pub mod contract;
pub mod fill;
pub mod ids;
pub mod order;
pub mod portfolio;
pub mod position;
pub mod trade;

pub use bar::{Bar, Session};
pub use contract::{ContractRegistry, ContractSpec, SessionWindow, TX_DAY, TX_NIGHT};
pub use fill::Fill;
pub use ids::IdGen;
pub use order::{OrderRequest, PriceType, Side};
pub use portfolio::PortfolioState;
pub use position::Position;
pub use trade::TradeRecord;
