//! Unit tests for ledger commands
//!
//! Database-backed tests for the service itself live in tests/.

#[cfg(test)]
mod tests {
    use crate::domain::{Amount, AmountError};
    use crate::ledger::{CreateTransactionCommand, UpdateTransactionCommand};
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    #[test]
    fn test_create_command_defaults() {
        let account_id = Uuid::new_v4();
        let cmd = CreateTransactionCommand::new(account_id, 2500);

        assert_eq!(cmd.account_id, account_id);
        assert_eq!(cmd.amount, 2500);
        assert!(cmd.category_id.is_none());
        assert!(cmd.weight.is_none());
        assert!(cmd.note.is_none());
    }

    #[test]
    fn test_create_command_builders() {
        let category_id = Uuid::new_v4();
        let cmd = CreateTransactionCommand::new(Uuid::new_v4(), 100)
            .with_category(category_id)
            .with_weight(dec!(2.5))
            .with_note("plastic bottles".to_string());

        assert_eq!(cmd.category_id, Some(category_id));
        assert_eq!(cmd.weight, Some(dec!(2.5)));
        assert_eq!(cmd.note, Some("plastic bottles".to_string()));
    }

    #[test]
    fn test_update_command_empty() {
        let cmd = UpdateTransactionCommand::new();

        assert!(cmd.is_empty());
        assert!(cmd.amount.is_none());
    }

    #[test]
    fn test_update_command_not_empty() {
        let cmd = UpdateTransactionCommand::new().with_amount(80);
        assert!(!cmd.is_empty());

        let cmd = UpdateTransactionCommand::new().with_note("corrected".to_string());
        assert!(!cmd.is_empty());

        let cmd = UpdateTransactionCommand::new()
            .with_category(Uuid::new_v4())
            .with_weight(dec!(0.75));
        assert!(!cmd.is_empty());
    }

    #[test]
    fn test_command_amounts_are_validated() {
        // The service validates through Amount before any write happens.
        let cmd = CreateTransactionCommand::new(Uuid::new_v4(), 0);
        assert!(matches!(Amount::new(cmd.amount), Err(AmountError::Zero)));

        let cmd = CreateTransactionCommand::new(Uuid::new_v4(), -5_000_000_000_000);
        assert!(matches!(
            Amount::new(cmd.amount),
            Err(AmountError::OutOfRange(_))
        ));

        let cmd = UpdateTransactionCommand::new().with_amount(80);
        let amount = cmd.amount.map(Amount::new).transpose();
        assert_eq!(amount.unwrap().map(|a| a.value()), Some(80));
    }
}
