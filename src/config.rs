use crate::cookies::SameSite;

/// Component API version announced to the host on start-up
const DEFAULT_API_VERSION: u32 = 1;

/// Main bridge configuration.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// Protocol version sent with the ready signal
    pub api_version: u32,
    /// Height of the rendering frame declared to the host. The component has no visual surface.
    pub frame_height: u32,
    /// SameSite policy used when a set request carries none
    pub default_same_site: SameSite,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            api_version: DEFAULT_API_VERSION,
            frame_height: 0,
            default_same_site: SameSite::Lax,
        }
    }
}
