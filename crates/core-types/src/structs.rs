use crate::enums::TargetType;
use crate::error::CoreError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Binds one source column to the next parameter of an insert statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnBinding {
    /// 1-indexed position in the header-defined column order of the source file.
    pub source_column: usize,
    pub target: TargetType,
}

impl ColumnBinding {
    pub fn new(source_column: usize, target: TargetType) -> Result<Self, CoreError> {
        if source_column == 0 {
            return Err(CoreError::InvalidColumn(source_column));
        }
        Ok(Self { source_column, target })
    }

    pub const fn text(source_column: usize) -> Self {
        Self { source_column, target: TargetType::Text }
    }

    pub const fn integer(source_column: usize) -> Self {
        Self { source_column, target: TargetType::Integer }
    }

    pub const fn decimal(source_column: usize) -> Self {
        Self { source_column, target: TargetType::Decimal }
    }

    /// The 0-indexed field position within a record.
    pub fn field_index(&self) -> usize {
        self.source_column.saturating_sub(1)
    }
}

/// Total revenue attributed to one product name.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct ProductRevenue {
    pub name: String,
    pub revenue: Decimal,
}

/// Total billed to one client name.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct ClientRevenue {
    pub name: String,
    pub total_billed: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_column_is_rejected() {
        assert_eq!(ColumnBinding::new(0, TargetType::Text), Err(CoreError::InvalidColumn(0)));
        assert_eq!(ColumnBinding::new(3, TargetType::Decimal), Ok(ColumnBinding::decimal(3)));
    }

    #[test]
    fn test_field_index_is_zero_based() {
        assert_eq!(ColumnBinding::text(1).field_index(), 0);
        assert_eq!(ColumnBinding::integer(3).field_index(), 2);
    }
}
