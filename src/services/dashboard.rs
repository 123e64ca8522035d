//! Dashboard aggregation
//!
//! Builds the data behind every dashboard widget in one pass: expiry status
//! counts, expiring and expired items, recent purchases, the Nutri-Score
//! average with its month-over-month trend, and the current budget.

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::PantryResult;
use crate::expiry::{self, ExpiryStatus};
use crate::models::{month_period, UserId};
use crate::score::{self, Grade, Trend};
use crate::storage::Storage;

use super::budget::{BudgetService, BudgetSummary};
use super::inventory::{InventoryService, InventoryView};

/// Average Nutri-Score of the inventory and how it moved
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NutriScoreSummary {
    /// Mean on the 1..=5 scale over items whose product has a grade
    pub current: Option<f64>,
    pub current_grade: Option<Grade>,
    /// Same mean over items bought before this month
    pub previous: Option<f64>,
    pub previous_grade: Option<Grade>,
    /// Percent change from `previous` to `current`
    pub variation: Option<f64>,
    pub trend: Option<Trend>,
}

impl NutriScoreSummary {
    fn from_views(views: &[InventoryView], month_start: NaiveDate) -> Self {
        let grade_of = |v: &InventoryView| v.product.as_ref().and_then(|p| p.nutri_score());

        let current = score::average(views.iter().map(grade_of));
        let previous = score::average(
            views
                .iter()
                .filter(|v| v.item.purchase_date < month_start)
                .map(grade_of),
        );

        let variation = match (current, previous) {
            (Some(c), Some(p)) => score::variation(c, p),
            _ => None,
        };

        Self {
            current,
            current_grade: current.map(Grade::from_number),
            previous,
            previous_grade: previous.map(Grade::from_number),
            variation,
            trend: variation.map(Trend::from_variation),
        }
    }
}

/// Everything the dashboard shows
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub today: NaiveDate,
    pub total_items: usize,
    /// Item count per status, in `ExpiryStatus::ALL` order
    pub status_counts: Vec<(ExpiryStatus, usize)>,
    /// Critical then warning items, soonest first
    pub expiring: Vec<InventoryView>,
    /// Expired items, oldest expiry first
    pub expired: Vec<InventoryView>,
    /// Latest purchases
    pub recent: Vec<InventoryView>,
    pub nutri_score: NutriScoreSummary,
    /// Active budget covering today
    pub budget: Option<BudgetSummary>,
}

impl DashboardSummary {
    pub fn count(&self, status: ExpiryStatus) -> usize {
        self.status_counts
            .iter()
            .find(|(s, _)| *s == status)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }
}

/// Service computing the dashboard
pub struct DashboardService<'a> {
    storage: &'a Storage,
    user_id: UserId,
    recent_limit: usize,
}

impl<'a> DashboardService<'a> {
    pub fn new(storage: &'a Storage, user_id: UserId, recent_limit: usize) -> Self {
        Self {
            storage,
            user_id,
            recent_limit,
        }
    }

    /// Compute the dashboard as of `today`
    pub fn summary(&self, today: NaiveDate) -> PantryResult<DashboardSummary> {
        let views = InventoryService::new(self.storage, self.user_id).views(today)?;

        let status_counts = ExpiryStatus::ALL
            .iter()
            .map(|status| (*status, views.iter().filter(|v| v.status == *status).count()))
            .collect();

        let mut expiring: Vec<InventoryView> = views
            .iter()
            .filter(|v| v.status.is_expiring())
            .cloned()
            .collect();
        expiry::sort_by_expiry(&mut expiring, |v| v.item.expiry_date);

        let mut expired: Vec<InventoryView> = views
            .iter()
            .filter(|v| v.status == ExpiryStatus::Expired)
            .cloned()
            .collect();
        expiry::sort_by_expiry(&mut expired, |v| v.item.expiry_date);

        // Views arrive most recent purchase first
        let recent = views.iter().take(self.recent_limit).cloned().collect();

        let (month_start, _) = month_period(today);
        let nutri_score = NutriScoreSummary::from_views(&views, month_start);

        let budgets = BudgetService::new(self.storage, self.user_id);
        let budget = match budgets.current(today)? {
            Some(current) => Some(budgets.summary(current)?),
            None => None,
        };

        tracing::debug!(
            items = views.len(),
            expiring = expiring.len(),
            expired = expired.len(),
            "computed dashboard"
        );

        Ok(DashboardSummary {
            today,
            total_items: views.len(),
            status_counts,
            expiring,
            expired,
            recent,
            nutri_score,
            budget,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::PantryPaths;
    use crate::models::{Expense, InventoryItem, Money, Product, ProductId, UnitType};
    use crate::services::{BudgetService, CreateBudgetInput};
    use chrono::Duration;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = PantryPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 15).unwrap()
    }

    fn graded(storage: &Storage, name: &str, grade: Option<Grade>) -> ProductId {
        let mut product = Product::new(name, UnitType::Unit);
        product.nutriscore = grade;
        let id = product.id;
        storage.products.upsert(product).unwrap();
        id
    }

    fn stock(
        storage: &Storage,
        user: UserId,
        product: ProductId,
        purchased: NaiveDate,
        expires_in: Option<i64>,
    ) {
        let mut item = InventoryItem::new(user, product, 1.0, purchased);
        item.expiry_date = expires_in.map(|d| today() + Duration::days(d));
        storage.inventory.upsert(item).unwrap();
    }

    #[test]
    fn test_empty_dashboard() {
        let (_temp_dir, storage) = create_test_storage();
        let summary = DashboardService::new(&storage, UserId::new(), 5)
            .summary(today())
            .unwrap();

        assert_eq!(summary.total_items, 0);
        assert!(summary.nutri_score.current.is_none());
        assert!(summary.nutri_score.variation.is_none());
        assert!(summary.budget.is_none());
        assert_eq!(summary.status_counts.len(), ExpiryStatus::ALL.len());
    }

    #[test]
    fn test_status_counts_and_expiring_order() {
        let (_temp_dir, storage) = create_test_storage();
        let user = UserId::new();
        let product = graded(&storage, "Lait", None);
        for days in [Some(6), Some(0), Some(-3), Some(30), None, Some(2)] {
            stock(&storage, user, product, today(), days);
        }

        let summary = DashboardService::new(&storage, user, 5)
            .summary(today())
            .unwrap();

        assert_eq!(summary.count(ExpiryStatus::Critical), 2);
        assert_eq!(summary.count(ExpiryStatus::Warning), 1);
        assert_eq!(summary.count(ExpiryStatus::Expired), 1);
        assert_eq!(summary.count(ExpiryStatus::Good), 1);
        assert_eq!(summary.count(ExpiryStatus::Unknown), 1);

        let days: Vec<_> = summary
            .expiring
            .iter()
            .map(|v| v.days_until_expiry)
            .collect();
        assert_eq!(days, vec![Some(0), Some(2), Some(6)]);
        assert_eq!(summary.expired.len(), 1);
    }

    #[test]
    fn test_recent_items_limited_and_ordered() {
        let (_temp_dir, storage) = create_test_storage();
        let user = UserId::new();
        let product = graded(&storage, "Pain", None);
        for back in 0..8 {
            stock(&storage, user, product, today() - Duration::days(back), None);
        }

        let summary = DashboardService::new(&storage, user, 3)
            .summary(today())
            .unwrap();

        let dates: Vec<_> = summary.recent.iter().map(|v| v.item.purchase_date).collect();
        assert_eq!(
            dates,
            vec![today(), today() - Duration::days(1), today() - Duration::days(2)]
        );
    }

    #[test]
    fn test_nutri_score_average_and_trend() {
        let (_temp_dir, storage) = create_test_storage();
        let user = UserId::new();
        let a = graded(&storage, "Pommes", Some(Grade::A));
        let c = graded(&storage, "Biscuits", Some(Grade::C));
        let none = graded(&storage, "Sel", None);
        let last_month = NaiveDate::from_ymd_opt(2025, 2, 20).unwrap();

        // Before this month: only C (3.0). Now: A, C, unknown -> (5+3)/2 = 4.0
        stock(&storage, user, c, last_month, None);
        stock(&storage, user, a, today(), None);
        stock(&storage, user, none, today(), None);

        let nutri = DashboardService::new(&storage, user, 5)
            .summary(today())
            .unwrap()
            .nutri_score;

        assert_eq!(nutri.current, Some(4.0));
        assert_eq!(nutri.current_grade, Some(Grade::B));
        assert_eq!(nutri.previous, Some(3.0));
        assert_eq!(nutri.previous_grade, Some(Grade::C));
        let variation = nutri.variation.unwrap();
        assert!((variation - 33.333).abs() < 0.01);
        assert_eq!(nutri.trend, Some(Trend::Improving));
    }

    #[test]
    fn test_budget_widget_uses_budget_covering_today() {
        let (_temp_dir, storage) = create_test_storage();
        let user = UserId::new();
        let budget = BudgetService::new(&storage, user)
            .create(CreateBudgetInput::monthly(Money::from_cents(20000)), today())
            .unwrap();
        storage
            .expenses
            .upsert(Expense::new(budget.id, Money::from_cents(18500), today()))
            .unwrap();

        let summary = DashboardService::new(&storage, user, 5)
            .summary(today())
            .unwrap();

        let widget = summary.budget.unwrap();
        assert_eq!(widget.budget.id, budget.id);
        assert_eq!(widget.stats.percentage, 93);
        assert_eq!(widget.stats.remaining.cents(), 1500);

        let next_month = DashboardService::new(&storage, user, 5)
            .summary(today() + Duration::days(31))
            .unwrap();
        assert!(next_month.budget.is_none());
    }
}
