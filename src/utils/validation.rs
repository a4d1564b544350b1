//! Validation utilities

use crate::traits::*;
use crate::types::*;
use bigdecimal::BigDecimal;

/// Validate that an amount is not negative, and optionally not zero
pub fn validate_amount(amount: &BigDecimal, reject_zero: bool) -> LedgerResult<()> {
    let zero = BigDecimal::from(0);
    if *amount < zero {
        return Err(LedgerError::Validation(format!(
            "Amount cannot be negative: {}",
            amount
        )));
    }

    if reject_zero && *amount == zero {
        return Err(LedgerError::Validation(
            "Amount must be greater than zero".to_string(),
        ));
    }

    Ok(())
}

/// Validate that a CPF is usable as a registry key
pub fn validate_cpf(cpf: &str) -> LedgerResult<()> {
    if cpf.trim().is_empty() {
        return Err(LedgerError::Validation("CPF cannot be empty".to_string()));
    }

    if cpf.len() > 50 {
        return Err(LedgerError::Validation(
            "CPF cannot exceed 50 characters".to_string(),
        ));
    }

    // Digits plus the usual '.' and '-' separators
    if !cpf
        .chars()
        .all(|c| c.is_ascii_digit() || c == '.' || c == '-')
    {
        return Err(LedgerError::Validation(
            "CPF can only contain digits, dots and dashes".to_string(),
        ));
    }

    Ok(())
}

/// Validate that a customer name is valid
pub fn validate_customer_name(name: &str) -> LedgerResult<()> {
    if name.trim().is_empty() {
        return Err(LedgerError::Validation(
            "Customer name cannot be empty".to_string(),
        ));
    }

    if name.chars().count() > 100 {
        return Err(LedgerError::Validation(
            "Customer name cannot exceed 100 characters".to_string(),
        ));
    }

    Ok(())
}

/// Stricter validator for deployments that want well-formed CPFs and bounded names
pub struct EnhancedCustomerValidator;

impl CustomerValidator for EnhancedCustomerValidator {
    fn validate_customer(&self, customer: &Customer) -> LedgerResult<()> {
        validate_cpf(&customer.cpf)?;
        validate_customer_name(&customer.name)
    }

    fn validate_name(&self, name: &str) -> LedgerResult<()> {
        validate_customer_name(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_validate_amount() {
        assert!(validate_amount(&BigDecimal::from(10), true).is_ok());
        assert!(validate_amount(&BigDecimal::from(0), false).is_ok());
        assert!(validate_amount(&BigDecimal::from(0), true).is_err());
        assert!(validate_amount(&BigDecimal::from(-1), false).is_err());
    }

    #[test]
    fn test_enhanced_validator() {
        let validator = EnhancedCustomerValidator;
        let now = Utc::now();

        let ok = Customer::new("123.456.789-09".to_string(), "Ana".to_string(), now);
        assert!(validator.validate_customer(&ok).is_ok());

        let letters = Customer::new("abc".to_string(), "Ana".to_string(), now);
        assert!(validator.validate_customer(&letters).is_err());

        assert!(validator.validate_name(&"x".repeat(101)).is_err());
    }
}
