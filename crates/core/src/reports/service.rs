//! Report generation service.

use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;
use daftar_shared::Fils;
use daftar_shared::types::AccountId;

use super::error::ReportError;
use super::types::{
    AssetSection, BalanceSheetReport, EquitySection, LiabilitySection, ProfitAndLossReport,
    ReportLine, ReportStatus, TrialBalanceItem, TrialBalanceReport,
};
use crate::accounts::{Account, AccountSubtype, AccountType};
use crate::journal::JournalLine;
use crate::period::DateRange;

/// Label of the computed equity line carrying cumulative profit.
pub const CURRENT_EARNINGS_LABEL: &str = "Current Period Earnings";

/// Service for generating financial reports.
///
/// Every method is a pure function of its arguments: the same accounts and
/// lines always produce the same report. Balances and totals use checked
/// arithmetic; a sum outside the `i64` range of fils is
/// [`ReportError::Overflow`].
pub struct ReportService;

impl ReportService {
    /// Generates a trial balance as of `as_of` (inclusive).
    ///
    /// Net debit balances land in the debit column, net credit balances in
    /// the credit column. Accounts that net to zero are omitted.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Overflow`] if a balance or column total
    /// overflows.
    pub fn generate_trial_balance(
        as_of: NaiveDate,
        accounts: &[Account],
        lines: &[JournalLine],
    ) -> Result<TrialBalanceReport, ReportError> {
        let (balances, has_data) = net_debits(accounts, lines, |date| date <= as_of)?;

        let items = balances
            .into_iter()
            .filter(|(_, net)| !net.is_zero())
            .map(|(account, net)| {
                let credit = if net.is_negative() {
                    net.checked_neg().ok_or(ReportError::Overflow)?
                } else {
                    Fils::ZERO
                };
                Ok(TrialBalanceItem {
                    account_id: account.id,
                    code: account.code.clone(),
                    name: account.name.clone(),
                    account_type: account.account_type,
                    normal_balance: account.normal_balance,
                    debit: if net.is_positive() { net } else { Fils::ZERO },
                    credit,
                    balance: account
                        .normal_balance
                        .signed_balance(net, Fils::ZERO)
                        .ok_or(ReportError::Overflow)?,
                })
            })
            .collect::<Result<Vec<_>, ReportError>>()?;

        let total_debit = checked_total(items.iter().map(|i| i.debit))?;
        let total_credit = checked_total(items.iter().map(|i| i.credit))?;
        let is_balanced = total_debit == total_credit;

        Ok(TrialBalanceReport {
            as_of,
            items,
            total_debit,
            total_credit,
            is_balanced,
            status: ReportStatus::from_check(has_data, is_balanced),
        })
    }

    /// Generates a balance sheet as of `as_of` (inclusive).
    ///
    /// Cumulative profit of income statement accounts is carried in equity
    /// as [`CURRENT_EARNINGS_LABEL`], so Assets = Liabilities + Equity holds
    /// whenever every journal entry balances.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Overflow`] if a balance or section total
    /// overflows.
    pub fn generate_balance_sheet(
        as_of: NaiveDate,
        accounts: &[Account],
        lines: &[JournalLine],
    ) -> Result<BalanceSheetReport, ReportError> {
        let (balances, has_data) = net_debits(accounts, lines, |date| date <= as_of)?;

        let mut assets = AssetSection::default();
        let mut liabilities = LiabilitySection::default();
        let mut equity = EquitySection::default();
        let mut earnings = Fils::ZERO;

        for (account, net) in balances {
            if account.account_type.is_income_statement() {
                earnings = earnings.checked_sub(net).ok_or(ReportError::Overflow)?;
                continue;
            }
            if net.is_zero() {
                continue;
            }
            let credit_net = net.checked_neg().ok_or(ReportError::Overflow)?;
            match account.account_type {
                AccountType::Asset => match account.subtype {
                    Some(AccountSubtype::Fixed | AccountSubtype::LongTerm) => {
                        assets.fixed.push(report_line(account, net));
                    }
                    Some(AccountSubtype::Current) | None => {
                        assets.current.push(report_line(account, net));
                    }
                },
                AccountType::Liability => match account.subtype {
                    Some(AccountSubtype::LongTerm | AccountSubtype::Fixed) => {
                        liabilities.long_term.push(report_line(account, credit_net));
                    }
                    Some(AccountSubtype::Current) | None => {
                        liabilities.current.push(report_line(account, credit_net));
                    }
                },
                _ => equity.all.push(report_line(account, credit_net)),
            }
        }

        if !earnings.is_zero() {
            equity.all.push(ReportLine {
                account_id: None,
                code: String::new(),
                name: CURRENT_EARNINGS_LABEL.to_string(),
                amount: earnings,
            });
        }

        assets.current_total = total(&assets.current)?;
        assets.fixed_total = total(&assets.fixed)?;
        assets.total = checked_total([assets.current_total, assets.fixed_total])?;
        assets.all = assets.current.iter().chain(&assets.fixed).cloned().collect();

        liabilities.current_total = total(&liabilities.current)?;
        liabilities.long_term_total = total(&liabilities.long_term)?;
        liabilities.total =
            checked_total([liabilities.current_total, liabilities.long_term_total])?;
        liabilities.all = liabilities
            .current
            .iter()
            .chain(&liabilities.long_term)
            .cloned()
            .collect();

        equity.total = total(&equity.all)?;

        let total_liabilities_and_equity = checked_total([liabilities.total, equity.total])?;
        let is_balanced = assets.total == total_liabilities_and_equity;

        Ok(BalanceSheetReport {
            as_of,
            assets,
            liabilities,
            equity,
            total_liabilities_and_equity,
            is_balanced,
            status: ReportStatus::from_check(has_data, is_balanced),
        })
    }

    /// Generates a profit and loss statement from activity inside `range`.
    ///
    /// Only lines dated within the range count; opening balances do not.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Overflow`] if a balance, section total, or
    /// profit figure overflows.
    pub fn generate_profit_and_loss(
        range: DateRange,
        accounts: &[Account],
        lines: &[JournalLine],
    ) -> Result<ProfitAndLossReport, ReportError> {
        let (balances, _) = net_debits(accounts, lines, |date| range.contains(date))?;
        let mut report = ProfitAndLossReport::empty(range);

        for (account, net) in balances.into_iter().filter(|(_, net)| !net.is_zero()) {
            let credit_net = || net.checked_neg().ok_or(ReportError::Overflow);
            match account.account_type {
                AccountType::Revenue => report.revenue.push(report_line(account, credit_net()?)),
                AccountType::Cogs => report.cogs.push(report_line(account, net)),
                AccountType::Expense => report.expenses.push(report_line(account, net)),
                AccountType::OtherIncome => {
                    report.other_income.push(report_line(account, credit_net()?));
                }
                AccountType::Asset | AccountType::Liability | AccountType::Equity => {}
            }
        }

        report.total_revenue = total(&report.revenue)?;
        report.total_cogs = total(&report.cogs)?;
        report.total_expenses = total(&report.expenses)?;
        report.total_other_income = total(&report.other_income)?;
        report.gross_profit = report
            .total_revenue
            .checked_sub(report.total_cogs)
            .ok_or(ReportError::Overflow)?;
        report.net_profit = report
            .gross_profit
            .checked_sub(report.total_expenses)
            .and_then(|p| p.checked_add(report.total_other_income))
            .ok_or(ReportError::Overflow)?;

        Ok(report)
    }

    /// Returns the distinct accounts referenced by `lines` that are missing
    /// from `accounts`, in ascending order.
    #[must_use]
    pub fn unknown_accounts(accounts: &[Account], lines: &[JournalLine]) -> Vec<AccountId> {
        let known: BTreeSet<AccountId> = accounts.iter().map(|a| a.id).collect();
        lines
            .iter()
            .map(|l| l.account_id)
            .filter(|id| !known.contains(id))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

/// Sums `debit - credit` per account for lines passing `in_scope`.
///
/// Returns every account (ordered by code) paired with its net debit, and
/// whether any line was in scope.
fn net_debits<'a>(
    accounts: &'a [Account],
    lines: &[JournalLine],
    in_scope: impl Fn(NaiveDate) -> bool,
) -> Result<(Vec<(&'a Account, Fils)>, bool), ReportError> {
    let mut nets: HashMap<AccountId, Fils> = HashMap::new();
    let mut has_data = false;

    for line in lines.iter().filter(|l| in_scope(l.entry_date)) {
        has_data = true;
        let net = nets.entry(line.account_id).or_default();
        let running = *net;
        *net = line
            .net_debit()
            .and_then(|line_net| running.checked_add(line_net))
            .ok_or(ReportError::Overflow)?;
    }

    let mut ordered: Vec<&Account> = accounts.iter().collect();
    ordered.sort_by(|a, b| a.code.cmp(&b.code).then(a.id.cmp(&b.id)));

    let balances = ordered
        .into_iter()
        .map(|account| (account, nets.get(&account.id).copied().unwrap_or_default()))
        .collect();

    Ok((balances, has_data))
}

fn report_line(account: &Account, amount: Fils) -> ReportLine {
    ReportLine {
        account_id: Some(account.id),
        code: account.code.clone(),
        name: account.name.clone(),
        amount,
    }
}

fn total(lines: &[ReportLine]) -> Result<Fils, ReportError> {
    checked_total(lines.iter().map(|l| l.amount))
}

fn checked_total(amounts: impl IntoIterator<Item = Fils>) -> Result<Fils, ReportError> {
    Fils::checked_sum(amounts).ok_or(ReportError::Overflow)
}
