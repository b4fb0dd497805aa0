use std::fmt;

use crate::foundation::core::Origin;
use crate::foundation::error::{Status, StretchError, StretchResult};
use crate::geometry::expansion::{ExpansionPlan, MAX_DIMENSION, plan_expansion};
use crate::host::params::HostParams;
use crate::pixel::channel::PixelFormat;
use crate::render::RenderSettings;
use crate::render::dispatch::{RawLayer, RawLayerMut, render_raw};

pub const NAME: &str = "Stretch";
pub const DESCRIPTION: &str = "Stretches pixels based on an anchor point and angle";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub bug: u32,
    pub build: u32,
}

pub const VERSION: Version = Version {
    major: 1,
    minor: 2,
    bug: 0,
    build: 0,
};

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}.{}", self.major, self.minor, self.bug, self.build)
    }
}

/// Text shown in the host's About dialog; lines are separated by `\r`.
pub fn about_text() -> String {
    format!("{NAME} v{}.{}\r{DESCRIPTION}", VERSION.major, VERSION.minor)
}

/// Capabilities announced to the host at global setup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct GlobalInfo {
    pub version: Version,
    /// Accepts 16-bit and float layers.
    pub deep_color_aware: bool,
    /// Render calls may run concurrently on different frames.
    pub threaded_rendering: bool,
}

/// Widget a parameter is edited with, and its range.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParamKind {
    /// Defaults are percentages of the layer size.
    Point { default_percent: [f64; 2] },
    Angle { default_deg: f64 },
    FloatSlider {
        valid_min: f64,
        valid_max: f64,
        slider_min: f64,
        slider_max: f64,
        default: f64,
        /// Decimal places shown.
        precision: u8,
    },
    /// `choices` are `|`-separated; `default` is 1-based.
    Popup { choices: &'static str, default: i32 },
}

/// One user-visible parameter.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ParamDecl {
    pub name: &'static str,
    /// Stable identifier saved in projects.
    pub disk_id: u32,
    pub kind: ParamKind,
}

impl ParamDecl {
    pub fn choice_count(&self) -> usize {
        match self.kind {
            ParamKind::Popup { choices, .. } => choices.split('|').count(),
            _ => 0,
        }
    }
}

/// Parameters in UI order.
pub static PARAMS: [ParamDecl; 4] = [
    ParamDecl {
        name: "Anchor Point",
        disk_id: 2,
        kind: ParamKind::Point {
            default_percent: [50.0, 50.0],
        },
    },
    ParamDecl {
        name: "Angle",
        disk_id: 3,
        kind: ParamKind::Angle { default_deg: 0.0 },
    },
    ParamDecl {
        name: "Shift Amount",
        disk_id: 1,
        kind: ParamKind::FloatSlider {
            valid_min: 0.0,
            valid_max: 10000.0,
            slider_min: 0.0,
            slider_max: 500.0,
            default: 0.0,
            precision: 0,
        },
    },
    ParamDecl {
        name: "Direction",
        disk_id: 4,
        kind: ParamKind::Popup {
            choices: "Both|Forward|Backward",
            default: 1,
        },
    },
];

/// Lifecycle commands a host sends.
#[derive(Debug)]
pub enum Command<'a> {
    GlobalSetup,
    ParamsSetup,
    /// Size the output for the coming render.
    FrameSetup {
        params: &'a HostParams,
        width: usize,
        height: usize,
        /// Whether the host lets the effect grow its output buffer.
        expand: bool,
    },
    Render {
        params: &'a HostParams,
        input: RawLayer<'a>,
        output: RawLayerMut<'a>,
        /// Offset of the input inside the output, from frame setup.
        origin: Origin,
    },
    About,
}

impl Command<'_> {
    pub fn name(&self) -> &'static str {
        match self {
            Self::GlobalSetup => "global_setup",
            Self::ParamsSetup => "params_setup",
            Self::FrameSetup { .. } => "frame_setup",
            Self::Render { .. } => "render",
            Self::About => "about",
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum Response {
    Global(GlobalInfo),
    Params(&'static [ParamDecl]),
    Frame(ExpansionPlan),
    Rendered(PixelFormat),
    About(String),
}

/// The effect as a host sees it. Holds no per-frame state; every command is independent.
#[derive(Clone, Debug, Default)]
pub struct StretchEffect {
    settings: RenderSettings,
}

impl StretchEffect {
    pub fn new(settings: RenderSettings) -> Self {
        Self { settings }
    }

    #[tracing::instrument(level = "debug", skip_all, fields(command = cmd.name()))]
    pub fn dispatch(&self, cmd: Command<'_>) -> StretchResult<Response> {
        let result = match cmd {
            Command::GlobalSetup => Ok(Response::Global(GlobalInfo {
                version: VERSION,
                deep_color_aware: true,
                threaded_rendering: true,
            })),
            Command::ParamsSetup => Ok(Response::Params(&PARAMS)),
            Command::FrameSetup {
                params,
                width,
                height,
                expand,
            } => frame_setup(params, width, height, expand).map(Response::Frame),
            Command::Render {
                params,
                input,
                output,
                origin,
            } => render_raw(input, output, &params.decode(), origin, &self.settings)
                .map(Response::Rendered),
            Command::About => Ok(Response::About(about_text())),
        };
        if let Err(err) = &result {
            tracing::warn!(status = Status::from(err).code(), %err, "command failed");
        }
        result
    }

    /// Like [`StretchEffect::dispatch`], reduced to the integer status a host expects.
    pub fn dispatch_status(&self, cmd: Command<'_>) -> (Status, Option<Response>) {
        let result = self.dispatch(cmd);
        let status = Status::of(&result);
        (status, result.ok())
    }
}

fn frame_setup(
    params: &HostParams,
    width: usize,
    height: usize,
    expand: bool,
) -> StretchResult<ExpansionPlan> {
    if width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(StretchError::validation(format!(
            "input {width}x{height} exceeds the {MAX_DIMENSION} pixel limit"
        )));
    }
    if !expand {
        return Ok(ExpansionPlan::identity(width, height));
    }
    Ok(plan_expansion(&params.decode(), width, height))
}

#[cfg(test)]
#[path = "../../tests/unit/host/command.rs"]
mod tests;
