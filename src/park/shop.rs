//! Shops, stalls and facilities

use serde::{Deserialize, Serialize};

use crate::core::error::{ParkError, Result};
use crate::core::types::{Money, ShopId, TilePos};
use crate::entity::guest::TicketType;
use crate::park::catalog::{ContentCatalog, Satisfies};
use crate::park::ride::FacilityStatus;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shop {
    pub id: ShopId,
    pub kind: String,
    pub satisfies: Satisfies,
    pub price: Money,
    pub status: FacilityStatus,
    pub location: TilePos,
    pub total_sales: u64,
    pub total_revenue: Money,
    /// Simulation clock of the last sale
    pub last_visited_at: Option<f64>,
}

impl Shop {
    pub fn new(
        id: ShopId,
        kind: impl Into<String>,
        satisfies: Satisfies,
        price: Money,
        location: TilePos,
    ) -> Self {
        Self {
            id,
            kind: kind.into(),
            satisfies,
            price,
            status: FacilityStatus::Open,
            location,
            total_sales: 0,
            total_revenue: 0,
            last_visited_at: None,
        }
    }

    pub fn from_catalog(
        id: ShopId,
        kind: &str,
        location: TilePos,
        catalog: &ContentCatalog,
    ) -> Result<Self> {
        let spec = catalog.shop(kind).ok_or(ParkError::UnknownShopType(id))?;
        Ok(Self::new(id, kind, spec.satisfies, spec.price, location))
    }

    pub fn is_open(&self) -> bool {
        self.status == FacilityStatus::Open
    }

    /// What one visit costs a guest holding `ticket`
    ///
    /// The gate ticket covers restrooms; goods are always sold.
    pub fn price_for(&self, ticket: TicketType) -> Money {
        match ticket {
            TicketType::PayGate if self.is_bathroom() => 0,
            _ => self.price.max(0),
        }
    }

    /// Free visits are always affordable
    pub fn affordable_by(&self, ticket: TicketType, cash: Money) -> bool {
        let price = self.price_for(ticket);
        price == 0 || cash >= price
    }

    pub fn is_bathroom(&self) -> bool {
        self.satisfies == Satisfies::Bathroom
    }
}
