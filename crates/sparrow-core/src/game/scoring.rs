/// Carry-over treatment for a single opponent of a win. `Continuing`
/// compounds a debt the opponent already owes the winner; `Dethroned`
/// halves what the winner owed the outgoing winner and turns it around.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarryOver {
    Continuing { prev: u32 },
    Dethroned { prev_on_old: u32 },
}

/// Half of `value`, rounded up on odd amounts.
pub fn half_rounded_up(value: u32) -> u32 {
    value.div_ceil(2)
}

/// New owed total for an opponent whose pairing carries a bonus.
/// `base` already includes any dealer bonus.
pub fn carried_total(base: u32, carry: CarryOver) -> u32 {
    match carry {
        CarryOver::Continuing { prev } => prev + half_rounded_up(prev) + base,
        CarryOver::Dethroned { prev_on_old } => prev_on_old / 2 + base,
    }
}

#[cfg(test)]
mod tests {
    use super::{carried_total, half_rounded_up, CarryOver};

    #[test]
    fn half_rounds_up_on_odd_values() {
        assert_eq!(half_rounded_up(10), 5);
        assert_eq!(half_rounded_up(7), 4);
        assert_eq!(half_rounded_up(9), 5);
        assert_eq!(half_rounded_up(1), 1);
    }

    #[test]
    fn continuing_streak_compounds_the_debt() {
        // Outstanding 10, new base (fan plus dealer bonus) 4: the debt is
        // kept, half of it is added, and the fresh amount lands on top.
        assert_eq!(carried_total(4, CarryOver::Continuing { prev: 10 }), 19);
        assert_eq!(carried_total(4, CarryOver::Continuing { prev: 7 }), 15);
    }

    #[test]
    fn dethroned_winner_repays_half() {
        assert_eq!(carried_total(4, CarryOver::Dethroned { prev_on_old: 10 }), 9);
        assert_eq!(carried_total(4, CarryOver::Dethroned { prev_on_old: 7 }), 7);
    }
}
