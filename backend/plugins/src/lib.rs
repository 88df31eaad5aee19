pub mod lifecycle;
pub mod manifest;
pub mod plugin;
pub mod status;

pub use lifecycle::{
    run_load_sequence, run_unload_sequence, DefaultPluginLifecycle, PluginLifecycle,
    PluginLifecycleContext, PluginState,
};
pub use manifest::{PluginManifest, PluginPermissions, PluginToolSlot};
pub use plugin::SomarkSyncPlugin;
pub use status::{PluginStatus, StatusConfig};

/// Plugin identity as reported to the host.
pub const PLUGIN_ID: &str = "somark-sync";

/// Gateway method answering with [`PluginStatus`].
pub const STATUS_METHOD: &str = "somark_sync.status";
