use vox::ReadOptions;

/// Which file's palette becomes the scene palette when several files are
/// loaded. The backend binds a single palette buffer, so only one can win.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PalettePolicy {
    /// Every file replaces the palette, so the last one is authoritative
    #[default]
    LastFileWins,
    FirstFileWins,
}

#[derive(Debug, Clone, Copy)]
pub struct SceneSettings {
    /// Spacing factor applied to each placed extent in the grid layout
    pub column_gap: f32,
    /// Ground plane side relative to the larger horizontal scene extent
    pub ground_plane_scale: f32,
    pub palette_policy: PalettePolicy,
    pub read_options: ReadOptions,

    pub raster_width: usize,
    pub raster_height: usize,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            column_gap: 1.1,
            ground_plane_scale: 2.0,
            palette_policy: PalettePolicy::LastFileWins,
            read_options: ReadOptions::default(),

            raster_width: crate::scene::DEFAULT_RASTER_WIDTH,
            raster_height: crate::scene::DEFAULT_RASTER_HEIGHT,
        }
    }
}
