// Host element ids and page-level presentation constants

pub const CANVAS_ID: &str = "canvas";
pub const SCENE_ATTR: &str = "data-scene";
pub const CONFIG_ATTR: &str = "data-config";

pub const PANEL_ID: &str = "debug-panel";
pub const PANEL_STYLE: &str = "position:absolute;top:0;right:0;width:260px;padding:6px 8px;\
background:rgba(26,26,26,0.9);color:#eee;font:11px system-ui;z-index:10;";
pub const PANEL_ROW_STYLE: &str = "display:flex;align-items:center;gap:6px;margin:3px 0;";
pub const PANEL_LABEL_STYLE: &str = "flex:0 0 96px;overflow:hidden;text-overflow:ellipsis;";

pub const STATS_ID: &str = "stats-overlay";
pub const STATS_STYLE: &str = "position:absolute;left:0px;top:0px;padding:2px 6px;\
background:rgba(0,0,34,0.85);color:#0ff;font:bold 10px monospace;z-index:10;";

// Three.js-style default clear: opaque black
pub const CLEAR_COLOR: wgpu::Color = wgpu::Color::BLACK;
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
