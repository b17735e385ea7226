//! Low-stock alert check.
//!
//! # Responsibility
//! - Decide whether the total cylinder count warrants a low-stock warning
//!   and render the alert message for the widget.

/// Threshold used when the caller does not configure one.
pub const DEFAULT_LOW_STOCK_THRESHOLD: u32 = 10;

/// Alert widget payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LowStockAlert {
    pub is_low_stock: bool,
    /// Empty when stock is not low.
    pub message: String,
}

/// Checks the total cylinder count against a threshold.
///
/// Low stock means strictly below the threshold; at or above it the alert is
/// inactive and the message is empty.
pub fn low_stock_alert(total_count: u32, threshold: u32) -> LowStockAlert {
    if total_count < threshold {
        LowStockAlert {
            is_low_stock: true,
            message: format!(
                "Warning: total cylinder stock is down to {total_count}, below the low-stock threshold of {threshold}."
            ),
        }
    } else {
        LowStockAlert {
            is_low_stock: false,
            message: String::new(),
        }
    }
}
