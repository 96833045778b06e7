//! Expenses: a per-session ledger with a fixed category list and per-category totals.

use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::AppError;
use crate::sessions::Session;
use crate::tools::{ToolHandler, ToolInput, ToolKind, ToolOutput};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpenseCategory {
    #[default]
    Food,
    Travel,
    Bills,
    Health,
}

impl ExpenseCategory {
    pub const ALL: [ExpenseCategory; 4] = [
        ExpenseCategory::Food,
        ExpenseCategory::Travel,
        ExpenseCategory::Bills,
        ExpenseCategory::Health,
    ];
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Expense {
    pub date: NaiveDate,
    pub item: String,
    pub category: ExpenseCategory,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: ExpenseCategory,
    pub amount: f64,
}

#[derive(Debug, Default)]
pub struct ExpenseLedger {
    rows: Vec<Expense>,
}

impl ExpenseLedger {
    pub fn add(&mut self, expense: Expense) -> Result<&Expense, AppError> {
        if !expense.amount.is_finite() || expense.amount < 0.0 {
            return Err(AppError::Validation(
                "Amount must be a non-negative number".to_string(),
            ));
        }
        self.rows.push(expense);
        self.rows
            .last()
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("ledger push lost a row")))
    }

    pub fn rows(&self) -> &[Expense] {
        &self.rows
    }

    /// Totals for categories that have at least one row, in category order.
    pub fn totals(&self) -> Vec<CategoryTotal> {
        ExpenseCategory::ALL
            .iter()
            .filter_map(|category| {
                let mut matching = self.rows.iter().filter(|r| r.category == *category).peekable();
                matching.peek()?;
                Some(CategoryTotal {
                    category: *category,
                    amount: matching.map(|r| r.amount).sum(),
                })
            })
            .collect()
    }

    pub fn grand_total(&self) -> f64 {
        self.rows.iter().map(|r| r.amount).sum()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
enum ExpensesAction {
    Add,
    #[default]
    List,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ExpensesRequest {
    action: ExpensesAction,
    item: String,
    amount: f64,
    category: ExpenseCategory,
    /// Defaults to today.
    date: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
struct LedgerView<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    saved: Option<Expense>,
    expenses: &'a [Expense],
    totals: Vec<CategoryTotal>,
    total: f64,
}

pub struct ExpensesTool;

#[async_trait]
impl ToolHandler for ExpensesTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Expenses
    }

    async fn invoke(&self, session: &mut Session, input: ToolInput) -> Result<ToolOutput, AppError> {
        let req: ExpensesRequest = input.params()?;
        let saved = match req.action {
            ExpensesAction::Add => {
                let expense = Expense {
                    date: req.date.unwrap_or_else(|| Local::now().date_naive()),
                    item: req.item,
                    category: req.category,
                    amount: req.amount,
                };
                let saved = session.expenses.add(expense)?.clone();
                debug!(session_id = %session.id, rows = session.expenses.rows().len(), "Expense saved");
                Some(saved)
            }
            ExpensesAction::List => None,
        };

        let ledger = &session.expenses;
        ToolOutput::json(&LedgerView {
            saved,
            expenses: ledger.rows(),
            totals: ledger.totals(),
            total: ledger.grand_total(),
        })
    }
}
