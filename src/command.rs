use std::fmt;

use thiserror::Error;

use crate::account::Balance;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Init,
    InitAccount,
    ReadAccount,
    Move,
    Transfer,
    Delete,
    Query,
}

impl Operation {
    pub const ALL: [Operation; 7] = [
        Operation::Init,
        Operation::InitAccount,
        Operation::ReadAccount,
        Operation::Move,
        Operation::Transfer,
        Operation::Delete,
        Operation::Query,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Operation::Init => "init",
            Operation::InitAccount => "initAccount",
            Operation::ReadAccount => "readAccount",
            Operation::Move => "move",
            Operation::Transfer => "transfer",
            Operation::Delete => "delete",
            Operation::Query => "query",
        }
    }

    /// Exact number of arguments the operation takes.
    pub fn arity(self) -> usize {
        match self {
            Operation::Init | Operation::InitAccount => 4,
            Operation::ReadAccount | Operation::Delete | Operation::Query => 1,
            Operation::Move => 3,
            Operation::Transfer => 5,
        }
    }

    pub fn from_name(name: &str) -> Result<Self, CommandError> {
        Self::ALL
            .into_iter()
            .find(|op| op.name() == name)
            .ok_or_else(|| CommandError::UnknownOperation {
                name: name.to_owned(),
            })
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Incorrect number of arguments for {operation}. Expecting {expected}, got {actual}")]
    WrongArgumentCount {
        operation: Operation,
        expected: usize,
        actual: usize,
    },
    #[error("Argument {position} of {operation} must be a non-empty string")]
    EmptyArgument {
        operation: Operation,
        position: usize,
    },
    #[error("Invalid value `{value}` for {operation}, expecting an integer value")]
    NotAnInteger { operation: Operation, value: String },
    #[error("{operation} needs two different parties, got `{name}` twice")]
    SameParty { operation: Operation, name: String },
    #[error("Unknown operation `{name}`, must be one of {}", known_operations())]
    UnknownOperation { name: String },
}

fn known_operations() -> String {
    Operation::ALL
        .iter()
        .map(|op| format!("'{op}'"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn expect_args<const N: usize>(
    operation: Operation,
    args: &[String],
) -> Result<&[String; N], CommandError> {
    args.try_into()
        .map_err(|_| CommandError::WrongArgumentCount {
            operation,
            expected: N,
            actual: args.len(),
        })
}

/// `position` is 1-based, as it is reported back to the caller.
fn non_empty(operation: Operation, position: usize, arg: &str) -> Result<String, CommandError> {
    if arg.is_empty() {
        Err(CommandError::EmptyArgument {
            operation,
            position,
        })
    } else {
        Ok(arg.to_owned())
    }
}

fn distinct(operation: Operation, first: &str, second: &str) -> Result<(), CommandError> {
    if first == second {
        Err(CommandError::SameParty {
            operation,
            name: first.to_owned(),
        })
    } else {
        Ok(())
    }
}

pub fn parse_integer(operation: Operation, value: &str) -> Result<Balance, CommandError> {
    value.parse().map_err(|_| CommandError::NotAnInteger {
        operation,
        value: value.to_owned(),
    })
}

/// Bootstraps two legacy entities with their holdings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitCommand {
    pub entities: [(String, Balance); 2],
}

impl InitCommand {
    pub fn parse(args: &[String]) -> Result<Self, CommandError> {
        let op = Operation::Init;
        let [a, a_val, b, b_val] = expect_args::<4>(op, args)?;
        Ok(Self {
            entities: [
                (non_empty(op, 1, a)?, parse_integer(op, a_val)?),
                (non_empty(op, 3, b)?, parse_integer(op, b_val)?),
            ],
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitAccountCommand {
    pub name: String,
    pub account_number: String,
    pub phone_number: String,
    pub balance: Balance,
}

impl InitAccountCommand {
    pub fn parse(args: &[String]) -> Result<Self, CommandError> {
        let op = Operation::InitAccount;
        let [name, account_number, phone_number, balance] = expect_args::<4>(op, args)?;
        let name = non_empty(op, 1, name)?;
        let account_number = non_empty(op, 2, account_number)?;
        let phone_number = non_empty(op, 3, phone_number)?;
        let balance = non_empty(op, 4, balance)?;
        Ok(Self {
            name,
            account_number,
            phone_number,
            balance: parse_integer(op, &balance)?,
        })
    }
}

/// Arguments of the single-key operations: `readAccount`, `delete` and `query`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameCommand {
    pub name: String,
}

impl NameCommand {
    pub fn parse(operation: Operation, args: &[String]) -> Result<Self, CommandError> {
        let [name] = expect_args::<1>(operation, args)?;
        Ok(Self {
            name: non_empty(operation, 1, name)?,
        })
    }
}

/// The amount is kept verbatim; it is only parsed once both parties have been
/// read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveCommand {
    pub from: String,
    pub to: String,
    pub amount: String,
}

impl MoveCommand {
    pub fn parse(args: &[String]) -> Result<Self, CommandError> {
        let op = Operation::Move;
        let [from, to, amount] = expect_args::<3>(op, args)?;
        let from = non_empty(op, 1, from)?;
        let to = non_empty(op, 2, to)?;
        distinct(op, &from, &to)?;
        Ok(Self {
            from,
            to,
            amount: amount.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferCommand {
    pub sender: String,
    pub recipient: String,
    pub amount: String,
    pub recipient_phone_number: String,
    pub message: String,
}

impl TransferCommand {
    pub fn parse(args: &[String]) -> Result<Self, CommandError> {
        let op = Operation::Transfer;
        let [sender, recipient, amount, recipient_phone_number, message] =
            expect_args::<5>(op, args)?;
        let sender = non_empty(op, 1, sender)?;
        let recipient = non_empty(op, 2, recipient)?;
        distinct(op, &sender, &recipient)?;
        Ok(Self {
            sender,
            recipient,
            amount: amount.clone(),
            recipient_phone_number: recipient_phone_number.clone(),
            message: message.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn operation_names() {
        for op in Operation::ALL {
            assert_eq!(Operation::from_name(op.name()).unwrap(), op);
        }
        let err = Operation::from_name("Move").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unknown operation `Move`, must be one of 'init', 'initAccount', 'readAccount', 'move', 'transfer', 'delete', 'query'"
        );
    }

    #[test]
    fn wrong_argument_count() {
        let err = MoveCommand::parse(&args(&["a", "b"])).unwrap_err();
        assert_eq!(
            err,
            CommandError::WrongArgumentCount {
                operation: Operation::Move,
                expected: 3,
                actual: 2
            }
        );
        assert_eq!(
            err.to_string(),
            "Incorrect number of arguments for move. Expecting 3, got 2"
        );
        assert!(TransferCommand::parse(&args(&["a", "b", "1", "555", "hi", "x"])).is_err());
        assert!(NameCommand::parse(Operation::Query, &[]).is_err());
        assert!(InitCommand::parse(&args(&["a", "1", "b"])).is_err());
    }

    #[test]
    fn init_account_validation() {
        let cmd = InitAccountCommand::parse(&args(&["alice", "001", "555", "-20"])).unwrap();
        assert_eq!(cmd.balance, -20);

        let err = InitAccountCommand::parse(&args(&["alice", "", "555", "10"])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Argument 2 of initAccount must be a non-empty string"
        );
        let err = InitAccountCommand::parse(&args(&["alice", "001", "555", ""])).unwrap_err();
        assert!(matches!(err, CommandError::EmptyArgument { position: 4, .. }));
        let err = InitAccountCommand::parse(&args(&["alice", "001", "555", "ten"])).unwrap_err();
        assert!(matches!(err, CommandError::NotAnInteger { .. }));
    }

    #[test]
    fn init_holdings_must_be_integers() {
        let cmd = InitCommand::parse(&args(&["a", "100", "b", "-5"])).unwrap();
        assert_eq!(cmd.entities, [("a".into(), 100), ("b".into(), -5)]);

        let err = InitCommand::parse(&args(&["a", "100", "b", "x"])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid value `x` for init, expecting an integer value"
        );
    }

    #[test]
    fn amount_is_not_parsed_eagerly() {
        let cmd = MoveCommand::parse(&args(&["a", "b", "lots"])).unwrap();
        assert_eq!(cmd.amount, "lots");
        let cmd = TransferCommand::parse(&args(&["a", "b", "", "555", ""])).unwrap();
        assert_eq!(cmd.amount, "");
        assert_eq!(cmd.message, "");
    }

    #[test]
    fn parties_must_differ() {
        let err = MoveCommand::parse(&args(&["a", "a", "1"])).unwrap_err();
        assert!(matches!(err, CommandError::SameParty { .. }));
        let err = TransferCommand::parse(&args(&["a", "a", "1", "555", "hi"])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "transfer needs two different parties, got `a` twice"
        );
    }
}
