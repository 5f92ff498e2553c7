//! Park ledger: cash and categorized monthly income

use serde::{Deserialize, Serialize};

use crate::core::error::{ParkError, Result};
use crate::core::types::Money;
use crate::entity::guest::Guest;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LedgerCategory {
    RideTickets,
    ShopSales,
    FacilityUsage,
    EntryFees,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyTotals {
    pub ride_tickets: Money,
    pub shop_sales: Money,
    pub facility_usage: Money,
    pub entry_fees: Money,
}

impl MonthlyTotals {
    pub fn get(&self, category: LedgerCategory) -> Money {
        match category {
            LedgerCategory::RideTickets => self.ride_tickets,
            LedgerCategory::ShopSales => self.shop_sales,
            LedgerCategory::FacilityUsage => self.facility_usage,
            LedgerCategory::EntryFees => self.entry_fees,
        }
    }

    fn add(&mut self, category: LedgerCategory, amount: Money) {
        match category {
            LedgerCategory::RideTickets => self.ride_tickets += amount,
            LedgerCategory::ShopSales => self.shop_sales += amount,
            LedgerCategory::FacilityUsage => self.facility_usage += amount,
            LedgerCategory::EntryFees => self.entry_fees += amount,
        }
    }

    pub fn total(&self) -> Money {
        self.ride_tickets + self.shop_sales + self.facility_usage + self.entry_fees
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Finances {
    pub cash: Money,
    pub this_month: MonthlyTotals,
    /// Closed months, oldest first
    pub history: Vec<MonthlyTotals>,
}

impl Finances {
    pub fn new(cash: Money) -> Self {
        Self {
            cash,
            ..Self::default()
        }
    }

    /// Move `amount` from a guest into the park
    ///
    /// Either both sides change or neither does. Non-positive amounts are
    /// free and always succeed.
    pub fn charge_guest(
        &mut self,
        guest: &mut Guest,
        amount: Money,
        category: LedgerCategory,
    ) -> Result<()> {
        if amount <= 0 {
            return Ok(());
        }
        if guest.cash < amount {
            return Err(ParkError::CannotAfford {
                guest: guest.id,
                price: amount,
                cash: guest.cash,
            });
        }
        guest.cash -= amount;
        guest.total_spent += amount;
        self.cash += amount;
        self.this_month.add(category, amount);
        Ok(())
    }

    /// Archive this month's totals and start a new month
    pub fn roll_month(&mut self) {
        let closed = std::mem::take(&mut self.this_month);
        self.history.push(closed);
    }
}
