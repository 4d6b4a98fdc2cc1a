use serde::{Deserialize, Serialize};

/// Fixed icon set a scenario can reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum IconKind {
    #[default]
    FileText,
    Camera,
    Receipt,
    MapPin,
    Code,
    Edit,
}

impl IconKind {
    /// Resolves a symbolic icon name. Unknown names fall back to `FileText`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "FileText" => Self::FileText,
            "Camera" => Self::Camera,
            "Receipt" => Self::Receipt,
            "MapPin" => Self::MapPin,
            "Code" => Self::Code,
            "Edit" | "Edit3" => Self::Edit,
            _ => Self::FileText,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::FileText => "FileText",
            Self::Camera => "Camera",
            Self::Receipt => "Receipt",
            Self::MapPin => "MapPin",
            Self::Code => "Code",
            Self::Edit => "Edit",
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Self::FileText => "📄",
            Self::Camera => "📷",
            Self::Receipt => "🧾",
            Self::MapPin => "📍",
            Self::Code => "💻",
            Self::Edit => "✏",
        }
    }
}
