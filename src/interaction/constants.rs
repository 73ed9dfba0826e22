//! Interaction constants - fixed rules of combat, trade and birth

// Combat
pub const COMBAT_DAMAGE: i32 = 5;

// Trade
pub const TRADE_PRICE: u32 = 1;

// Meetings
pub const GIFT_AMOUNT: u32 = 1;
pub const BIRTH_TRANSFER_THRESHOLD: u32 = 2;
pub const COOPERATE_HEAL: i32 = 1;
pub const DISPUTE_DAMAGE: i32 = 1;
/// Disputes never push vitality below this
pub const DISPUTE_FLOOR: i32 = 1;

// Newborns
pub const BIRTH_VITALITY: i32 = 5;
pub const BIRTH_ITEM: &str = "bundle";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_birth_constants_reasonable() {
        assert!(BIRTH_VITALITY > 0);
        assert!(BIRTH_TRANSFER_THRESHOLD >= GIFT_AMOUNT);
    }

    #[test]
    fn test_disputes_cannot_kill() {
        assert!(DISPUTE_FLOOR > 0);
    }
}
