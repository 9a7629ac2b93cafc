//! Castling bookkeeping.
//!
//! The low nibble records castles that were actually played, the high nibble
//! records castles that can no longer happen. Bits are only ever set during a
//! game, never cleared.

use crate::game_state::chess_types::{CastleSide, Color};

pub const LIGHT_KINGSIDE_CASTLED: u8 = 1 << 0;
pub const LIGHT_QUEENSIDE_CASTLED: u8 = 1 << 1;
pub const DARK_KINGSIDE_CASTLED: u8 = 1 << 2;
pub const DARK_QUEENSIDE_CASTLED: u8 = 1 << 3;
pub const LIGHT_KINGSIDE_UNAVAILABLE: u8 = 1 << 4;
pub const LIGHT_QUEENSIDE_UNAVAILABLE: u8 = 1 << 5;
pub const DARK_KINGSIDE_UNAVAILABLE: u8 = 1 << 6;
pub const DARK_QUEENSIDE_UNAVAILABLE: u8 = 1 << 7;

pub const ALL_UNAVAILABLE: u8 = 0xF0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastleStatus(u8);

impl CastleStatus {
    /// Every castle still possible, none played.
    #[inline]
    pub const fn new() -> Self {
        Self(0)
    }

    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Slot `0..4` for a `(color, side)` pair, shared by both nibbles.
    #[inline]
    pub const fn slot(color: Color, side: CastleSide) -> u8 {
        (color.index() * 2 + side.index()) as u8
    }

    #[inline]
    pub const fn castled_bit(color: Color, side: CastleSide) -> u8 {
        1 << Self::slot(color, side)
    }

    #[inline]
    pub const fn unavailable_bit(color: Color, side: CastleSide) -> u8 {
        1 << (Self::slot(color, side) + 4)
    }

    #[inline]
    pub const fn is_allowed(self, color: Color, side: CastleSide) -> bool {
        self.0 & Self::unavailable_bit(color, side) == 0
    }

    #[inline]
    pub const fn has_castled(self, color: Color) -> bool {
        self.0
            & (Self::castled_bit(color, CastleSide::Kingside)
                | Self::castled_bit(color, CastleSide::Queenside))
            != 0
    }

    /// Unavailable nibble shifted down to `0..16`.
    #[inline]
    pub const fn unavailable_mask(self) -> u8 {
        (self.0 & ALL_UNAVAILABLE) >> 4
    }

    /// Mark one castle as gone. Returns the unavailable bits that flipped, as a
    /// `0..16` mask, so callers can fold the change into the position hash.
    #[inline]
    pub fn revoke(&mut self, color: Color, side: CastleSide) -> u8 {
        let before = self.unavailable_mask();
        self.0 |= Self::unavailable_bit(color, side);
        self.unavailable_mask() ^ before
    }

    /// Both castles of `color` gone (the king moved).
    #[inline]
    pub fn revoke_all(&mut self, color: Color) -> u8 {
        self.revoke(color, CastleSide::Kingside) | self.revoke(color, CastleSide::Queenside)
    }

    /// Record a played castle. Returns the newly unavailable bits.
    #[inline]
    pub fn mark_castled(&mut self, color: Color, side: CastleSide) -> u8 {
        self.0 |= Self::castled_bit(color, side);
        self.revoke_all(color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bit_layout_matches_named_constants() {
        assert_eq!(
            CastleStatus::castled_bit(Color::Dark, CastleSide::Queenside),
            DARK_QUEENSIDE_CASTLED
        );
        assert_eq!(
            CastleStatus::unavailable_bit(Color::Light, CastleSide::Queenside),
            LIGHT_QUEENSIDE_UNAVAILABLE
        );
        assert_eq!(
            CastleStatus::unavailable_bit(Color::Dark, CastleSide::Kingside),
            DARK_KINGSIDE_UNAVAILABLE
        );
        assert_eq!(
            LIGHT_KINGSIDE_CASTLED | LIGHT_QUEENSIDE_CASTLED | LIGHT_KINGSIDE_UNAVAILABLE,
            0b0001_0011
        );
    }

    #[test]
    fn revocation_is_monotonic_and_reports_only_new_bits() {
        let mut status = CastleStatus::new();
        assert_eq!(status.revoke(Color::Light, CastleSide::Kingside), 0b0001);
        assert_eq!(status.revoke(Color::Light, CastleSide::Kingside), 0);
        assert_eq!(status.revoke_all(Color::Light), 0b0010);
        assert!(!status.is_allowed(Color::Light, CastleSide::Queenside));
        assert!(status.is_allowed(Color::Dark, CastleSide::Queenside));
    }

    #[test]
    fn castling_sets_castled_and_unavailable_bits() {
        let mut status = CastleStatus::new();
        let flipped = status.mark_castled(Color::Dark, CastleSide::Kingside);
        assert_eq!(flipped, 0b1100);
        assert!(status.has_castled(Color::Dark));
        assert!(!status.has_castled(Color::Light));
        assert!(!status.is_allowed(Color::Dark, CastleSide::Queenside));
    }
}
