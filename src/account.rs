use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type Balance = i64;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Withdrawal,
    Deposit,
}

/// Discriminant written into every JSON record, so that bytes of one shape
/// are never decoded as another.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DocType {
    Customer,
    Transaction,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Transaction {
    pub(crate) doc_type: DocType,
    #[serde(rename = "txType")]
    pub kind: TransactionKind,
    pub amount: Balance,
    pub message: String,
}

impl Transaction {
    pub fn new(kind: TransactionKind, amount: Balance, message: impl Into<String>) -> Self {
        Self {
            doc_type: DocType::Transaction,
            kind,
            amount,
            message: message.into(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccountError {
    #[error("{kind:?} of {amount} overflows the balance of {name}")]
    BalanceOverflow {
        name: String,
        kind: TransactionKind,
        amount: Balance,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Account {
    pub(crate) doc_type: DocType,
    pub name: String,
    pub account_number: String,
    pub phone_number: String,
    /// No lower bound, an account may be overdrawn.
    pub balance: Balance,
    /// Append-only, oldest first.
    pub history: Vec<Transaction>,
}

impl Account {
    pub fn new(
        name: impl Into<String>,
        account_number: impl Into<String>,
        phone_number: impl Into<String>,
        balance: Balance,
    ) -> Self {
        Self {
            doc_type: DocType::Customer,
            name: name.into(),
            account_number: account_number.into(),
            phone_number: phone_number.into(),
            balance,
            history: Vec::new(),
        }
    }

    /// Builds the history entry for moving `amount` in or out of this account.
    ///
    /// The only rejected case is arithmetic overflow. A withdrawal larger than
    /// the balance is accepted and leaves the balance negative.
    pub fn handle_transaction(
        &self,
        kind: TransactionKind,
        amount: Balance,
        message: &str,
    ) -> Result<Transaction, AccountError> {
        let next = match kind {
            TransactionKind::Withdrawal => self.balance.checked_sub(amount),
            TransactionKind::Deposit => self.balance.checked_add(amount),
        };
        match next {
            Some(_) => Ok(Transaction::new(kind, amount, message)),
            None => Err(AccountError::BalanceOverflow {
                name: self.name.clone(),
                kind,
                amount,
            }),
        }
    }

    /// Applies a transaction produced by [`Account::handle_transaction`] on the
    /// same account state. The transaction is appended to the history.
    ///
    /// The balance arithmetic is unchecked; overflow has to be ruled out by
    /// `handle_transaction` beforehand.
    pub(crate) fn apply(&mut self, tx: Transaction) {
        match tx.kind {
            TransactionKind::Withdrawal => self.balance -= tx.amount,
            TransactionKind::Deposit => self.balance += tx.amount,
        }
        self.history.push(tx);
    }
}

/// Balance of a legacy entity, stored as a bare decimal string without any
/// history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawValue(pub Balance);
