//! Groups awaiting the player's judgment, oldest first

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::track::Slot;
use crate::error::GameError;

/// Outcome of judging one group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Judgment {
    /// Slot that held the judged group
    pub slot: usize,
    pub player_was_right: bool,
    pub score_delta: i64,
    pub true_value: u8,
    pub displayed_value: u8,
}

/// FIFO of slot indices
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnswerQueue {
    entries: VecDeque<usize>,
}

impl AnswerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, slot: usize) {
        self.entries.push_back(slot);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Oldest entry
    pub fn head(&self) -> Option<usize> {
        self.entries.front().copied()
    }

    /// Drop an entry that will never be judged. Returns false if it was not queued.
    pub fn remove(&mut self, slot: usize) -> bool {
        match self.entries.iter().position(|&s| s == slot) {
            Some(0) => {
                self.entries.pop_front();
                true
            }
            Some(i) => {
                // Slots scroll in lockstep, so an expiring slot should always be the oldest
                log::warn!("Slot {} expired behind {} older entries", slot, i);
                self.entries.remove(i);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Judge the oldest group.
    ///
    /// The player is right when accepting a correct claim or rejecting a wrong
    /// one. A right answer gains the group's fu, a wrong one loses it; groups
    /// worth 0 fu move the score by `score_floor` instead.
    pub fn resolve_head(
        &mut self,
        slots: &mut [Slot],
        player_accepts: bool,
        score_floor: i64,
    ) -> Result<Judgment, GameError> {
        let index = self.head().ok_or(GameError::EmptyQueue)?;
        let slot = slots.get_mut(index).ok_or(GameError::VacantSlot(index))?;
        let group = slot.occupant.as_ref().ok_or(GameError::VacantSlot(index))?;

        let player_was_right = player_accepts == group.claim_is_correct();
        let magnitude = match group.true_value {
            0 => score_floor,
            fu => fu as i64,
        };
        let judgment = Judgment {
            slot: index,
            player_was_right,
            score_delta: if player_was_right { magnitude } else { -magnitude },
            true_value: group.true_value,
            displayed_value: group.displayed_value,
        };

        slot.answered = true;
        self.entries.pop_front();
        Ok(judgment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::group::{ComposedImage, GroupKind, TileGroup};
    use crate::sim::tile::{Suit, Tile};

    fn slot_with(true_value: u8, displayed_value: u8) -> Slot {
        Slot {
            visible: true,
            occupant: Some(TileGroup {
                kind: GroupKind::ConcealedTriplet,
                tiles: vec![Tile::upright(Suit::Circles, 5); 3],
                true_value,
                displayed_value,
                wait: None,
                composed_image: ComposedImage::default(),
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_fifo_order() {
        let mut slots: Vec<Slot> = (0..6).map(|i| slot_with(4, i as u8)).collect();
        let mut queue = AnswerQueue::new();
        for slot in [2, 5, 1] {
            queue.enqueue(slot);
        }

        let order: Vec<usize> = (0..3)
            .map(|_| queue.resolve_head(&mut slots, true, 1).unwrap().slot)
            .collect();
        assert_eq!(order, vec![2, 5, 1]);
        assert!(slots[2].answered && slots[5].answered && slots[1].answered);
        assert!(!slots[0].answered);
    }

    #[test]
    fn test_accepting_correct_claim() {
        let mut slots = vec![slot_with(4, 4)];
        let mut queue = AnswerQueue::new();
        queue.enqueue(0);

        let judgment = queue.resolve_head(&mut slots, true, 1).unwrap();
        assert!(judgment.player_was_right);
        assert_eq!(judgment.score_delta, 4);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_accepting_wrong_claim() {
        let mut slots = vec![slot_with(8, 2)];
        let mut queue = AnswerQueue::new();
        queue.enqueue(0);

        let judgment = queue.resolve_head(&mut slots, true, 1).unwrap();
        assert!(!judgment.player_was_right);
        assert_eq!(judgment.score_delta, -8);
    }

    #[test]
    fn test_rejecting_wrong_claim() {
        let mut slots = vec![slot_with(8, 2)];
        let mut queue = AnswerQueue::new();
        queue.enqueue(0);

        let judgment = queue.resolve_head(&mut slots, false, 1).unwrap();
        assert!(judgment.player_was_right);
        assert_eq!(judgment.score_delta, 8);
    }

    #[test]
    fn test_zero_fu_uses_floor() {
        for (displayed, accepts) in [(0, true), (0, false), (4, true), (4, false)] {
            let mut slots = vec![slot_with(0, displayed)];
            let mut queue = AnswerQueue::new();
            queue.enqueue(0);

            let judgment = queue.resolve_head(&mut slots, accepts, 1).unwrap();
            assert_eq!(judgment.score_delta.abs(), 1);
        }
    }

    #[test]
    fn test_empty_queue() {
        let mut queue = AnswerQueue::new();
        assert!(matches!(
            queue.resolve_head(&mut [], true, 1),
            Err(GameError::EmptyQueue)
        ));
    }

    #[test]
    fn test_vacant_slot_is_reported() {
        let mut slots = vec![Slot::default()];
        let mut queue = AnswerQueue::new();
        queue.enqueue(0);
        assert!(matches!(
            queue.resolve_head(&mut slots, true, 1),
            Err(GameError::VacantSlot(0))
        ));
        // Entry is left in place for the caller to inspect
        assert_eq!(queue.head(), Some(0));
    }

    #[test]
    fn test_remove() {
        let mut queue = AnswerQueue::new();
        queue.enqueue(3);
        queue.enqueue(1);
        assert!(queue.remove(3));
        assert!(!queue.remove(3));
        assert_eq!(queue.head(), Some(1));
    }
}
