use typed_builder::TypedBuilder;

use crate::machine::GameBoyModel;

/// Default monochrome shades, lightest first.
pub const DEFAULT_DMG_PALETTE: [[u8; 3]; 4] = [
    [0xFF, 0xFF, 0xFF],
    [0xAA, 0xAA, 0xAA],
    [0x55, 0x55, 0x55],
    [0x00, 0x00, 0x00],
];

/// Machine construction options.
///
/// ```
/// use dotmatrix_gb::{GameBoyConfig, GameBoyModel};
///
/// let config = GameBoyConfig::builder()
///     .model(Some(GameBoyModel::Dmg))
///     .build();
/// assert!(config.verify_header_checksum);
/// ```
#[derive(Clone, Debug, TypedBuilder)]
pub struct GameBoyConfig {
    /// Hardware model to emulate. `None` picks CGB when the cartridge header
    /// advertises colour support and DMG otherwise.
    #[builder(default)]
    pub model: Option<GameBoyModel>,
    /// Check the header checksum at 0x14D on load. A mismatch is only logged.
    #[builder(default = true)]
    pub verify_header_checksum: bool,
    /// RGB output for the four monochrome shades (DMG mode).
    #[builder(default = DEFAULT_DMG_PALETTE)]
    pub dmg_palette: [[u8; 3]; 4],
    /// Start from zeroed registers instead of the post-boot-ROM state.
    #[builder(default)]
    pub skip_boot_state: bool,
}

impl Default for GameBoyConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
