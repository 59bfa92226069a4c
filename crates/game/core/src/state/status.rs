/// Status effects the server can attach to a player.
///
/// Parsed from the server's upper snake case names.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::EnumString, strum::Display, strum::IntoStaticStr,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusEffect {
    Stun,
    Blind,
    Poison,
    Bleed,
    Reverse,
    Invisible,
    Undead,
    ControlImmunity,
    Revival,
}

impl StatusEffect {
    /// Effects that keep draining health or prevent acting.
    pub fn is_debuff(self) -> bool {
        matches!(
            self,
            StatusEffect::Stun
                | StatusEffect::Blind
                | StatusEffect::Poison
                | StatusEffect::Bleed
                | StatusEffect::Reverse
        )
    }

    pub fn is_beneficial(self) -> bool {
        matches!(
            self,
            StatusEffect::Invisible
                | StatusEffect::Undead
                | StatusEffect::ControlImmunity
                | StatusEffect::Revival
        )
    }
}
