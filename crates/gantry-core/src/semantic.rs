//! Semantic model types for diagrams.
//!
//! These enums describe what a diagram element *is* (its category, the flow
//! direction, the output format), independent of how it is laid out or
//! rendered. The names match external configuration strings (snake_case).

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::{
    color::Color,
    draw::{DiamondDefinition, OvalDefinition, RectangleDefinition, ShapeDefinition},
};

/// The semantic category of a node symbol.
///
/// The category fixes both the outline shape and the default fill color, so
/// nodes of the same kind look alike across diagrams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeCategory {
    /// A compute instance (for example an EC2 machine).
    ComputeInstance,
    /// A human actor.
    User,
    /// A network gateway.
    Gateway,
    /// A routing table.
    RouteTable,
    /// A plain file or unclassified artifact.
    GenericIcon,
    /// An SDK or provisioning tool.
    SdkTool,
}

impl NodeCategory {
    /// The outline definition for this category, with its palette applied.
    pub fn shape_definition(self) -> Box<dyn ShapeDefinition> {
        match self {
            Self::ComputeInstance => Box::new(
                RectangleDefinition::new().with_fill_color(self.fill_color()),
            ),
            Self::User => Box::new(OvalDefinition::new().with_fill_color(self.fill_color())),
            Self::Gateway => Box::new(DiamondDefinition::new().with_fill_color(self.fill_color())),
            Self::RouteTable => Box::new(
                RectangleDefinition::new()
                    .with_fill_color(self.fill_color())
                    .with_rounded(4),
            ),
            Self::GenericIcon => Box::new(
                RectangleDefinition::new().with_fill_color(self.fill_color()),
            ),
            Self::SdkTool => Box::new(
                RectangleDefinition::new()
                    .with_fill_color(self.fill_color())
                    .with_rounded(8),
            ),
        }
    }

    /// Default fill for this category.
    pub fn fill_color(self) -> Color {
        let value = match self {
            Self::ComputeInstance => "#f5a623",
            Self::User => "#d4dada",
            Self::Gateway => "#c5a3ff",
            Self::RouteTable => "#dcc9f5",
            Self::GenericIcon => "#f2f2f2",
            Self::SdkTool => "#b9a0e0",
        };
        Color::new(value).expect("category palette colors always parse")
    }
}

impl Display for NodeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::ComputeInstance => "compute_instance",
            Self::User => "user",
            Self::Gateway => "gateway",
            Self::RouteTable => "route_table",
            Self::GenericIcon => "generic_icon",
            Self::SdkTool => "sdk_tool",
        };
        write!(f, "{s}")
    }
}

/// Flow direction of the layered layout.
///
/// The layered layout always stacks layers top to bottom internally; the
/// other directions are coordinate transforms of that result.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Layers flow downward.
    TopToBottom,
    /// Layers flow upward.
    BottomToTop,
    /// Layers flow rightward (default).
    #[default]
    LeftToRight,
    /// Layers flow leftward.
    RightToLeft,
}

impl FromStr for Direction {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top_to_bottom" | "tb" => Ok(Self::TopToBottom),
            "bottom_to_top" | "bt" => Ok(Self::BottomToTop),
            "left_to_right" | "lr" => Ok(Self::LeftToRight),
            "right_to_left" | "rl" => Ok(Self::RightToLeft),
            _ => Err("Unsupported direction"),
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::TopToBottom => "top_to_bottom",
            Self::BottomToTop => "bottom_to_top",
            Self::LeftToRight => "left_to_right",
            Self::RightToLeft => "right_to_left",
        };
        write!(f, "{s}")
    }
}

/// The rendered artifact's file format.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Scalable Vector Graphics (default and currently only format).
    #[default]
    Svg,
}

impl OutputFormat {
    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Svg => "svg",
        }
    }
}

impl Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}
