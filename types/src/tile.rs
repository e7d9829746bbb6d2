//! The fixed catalogue of dashboard tiles and the policy that picks which
//! ones a user sees.

use std::str::FromStr;

use crate::capability::Capabilities;

/// Where a tile leads. Each variant maps to one route in the web app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Destination {
    Trainings,
    Events,
    Certificates,
    Documents,
    Presentation,
    Devices,
    Users,
    Exams,
    Access,
}

impl Destination {
    pub const ALL: [Destination; 9] = [
        Destination::Trainings,
        Destination::Events,
        Destination::Certificates,
        Destination::Documents,
        Destination::Presentation,
        Destination::Devices,
        Destination::Users,
        Destination::Exams,
        Destination::Access,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Destination::Trainings => "/trainings",
            Destination::Events => "/events",
            Destination::Certificates => "/certificates",
            Destination::Documents => "/documents",
            Destination::Presentation => "/presentation",
            Destination::Devices => "/devices",
            Destination::Users => "/users",
            Destination::Exams => "/exams",
            Destination::Access => "/access",
        }
    }

    /// The catalogue entry for this destination.
    pub fn tile(self) -> &'static Tile {
        match self {
            Destination::Trainings => &MY_TRAININGS,
            Destination::Events => &APPOINTMENTS,
            Destination::Certificates => &CERTIFICATES,
            Destination::Documents => &DOCUMENTS,
            Destination::Presentation => &PRESENTATION,
            Destination::Devices => &DEVICE_MANAGEMENT,
            Destination::Users => &USER_MANAGEMENT,
            Destination::Exams => &EXAM_MANAGEMENT,
            Destination::Access => &ACCESS_RIGHTS,
        }
    }

    /// The path without its leading slash, as used in a route segment.
    pub fn slug(self) -> &'static str {
        &self.path()[1..]
    }
}

impl std::fmt::Display for Destination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDestination(String);

impl std::fmt::Display for UnknownDestination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown section: {}", self.0)
    }
}

impl FromStr for Destination {
    type Err = UnknownDestination;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Destination::ALL
            .into_iter()
            .find(|d| d.slug() == s)
            .ok_or_else(|| UnknownDestination(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    BookOpen,
    Calendar,
    GraduationCap,
    FileText,
    Presentation,
    Settings,
    Users,
    ShieldCheck,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accent {
    Blue,
    Green,
    Purple,
    Indigo,
    Orange,
    DeepBlue,
    Yellow,
    Red,
    Emerald,
}

impl Accent {
    pub fn class(self) -> &'static str {
        match self {
            Accent::Blue => "accent-blue",
            Accent::Green => "accent-green",
            Accent::Purple => "accent-purple",
            Accent::Indigo => "accent-indigo",
            Accent::Orange => "accent-orange",
            Accent::DeepBlue => "accent-deep-blue",
            Accent::Yellow => "accent-yellow",
            Accent::Red => "accent-red",
            Accent::Emerald => "accent-emerald",
        }
    }
}

/// Which capability makes a tile visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    Training,
    Events,
    Admin,
}

impl Gate {
    pub fn allows(self, caps: &Capabilities) -> bool {
        match self {
            Gate::Training => caps.has_training_access(),
            Gate::Events => caps.has_events_access(),
            Gate::Admin => caps.is_admin(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub gate: Gate,
    pub icon: Icon,
    pub accent: Accent,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub action: &'static str,
    pub destination: Destination,
}

static MY_TRAININGS: Tile = Tile {
    gate: Gate::Training,
    icon: Icon::BookOpen,
    accent: Accent::Blue,
    title: "My Trainings",
    subtitle: "Current and completed trainings",
    action: "View all",
    destination: Destination::Trainings,
};

static APPOINTMENTS: Tile = Tile {
    gate: Gate::Events,
    icon: Icon::Calendar,
    accent: Accent::Green,
    title: "Appointments",
    subtitle: "Scheduled and available appointments",
    action: "Open calendar",
    destination: Destination::Events,
};

static CERTIFICATES: Tile = Tile {
    gate: Gate::Admin,
    icon: Icon::GraduationCap,
    accent: Accent::Purple,
    title: "Certificates",
    subtitle: "Certificate management",
    action: "Manage",
    destination: Destination::Certificates,
};

static DOCUMENTS: Tile = Tile {
    gate: Gate::Admin,
    icon: Icon::FileText,
    accent: Accent::Indigo,
    title: "Documents",
    subtitle: "Technical documentation and manuals",
    action: "Manage",
    destination: Destination::Documents,
};

static PRESENTATION: Tile = Tile {
    gate: Gate::Admin,
    icon: Icon::Presentation,
    accent: Accent::Orange,
    title: "Presentation",
    subtitle: "Available device types and models",
    action: "Manage",
    destination: Destination::Presentation,
};

static DEVICE_MANAGEMENT: Tile = Tile {
    gate: Gate::Admin,
    icon: Icon::Settings,
    accent: Accent::DeepBlue,
    title: "Device Management",
    subtitle: "Manage device types and models",
    action: "Manage",
    destination: Destination::Devices,
};

static USER_MANAGEMENT: Tile = Tile {
    gate: Gate::Admin,
    icon: Icon::Users,
    accent: Accent::Yellow,
    title: "User Management",
    subtitle: "Manage and approve users",
    action: "Manage",
    destination: Destination::Users,
};

static EXAM_MANAGEMENT: Tile = Tile {
    gate: Gate::Admin,
    icon: Icon::GraduationCap,
    accent: Accent::Red,
    title: "Exam Management",
    subtitle: "Create and manage exams",
    action: "Manage",
    destination: Destination::Exams,
};

static ACCESS_RIGHTS: Tile = Tile {
    gate: Gate::Admin,
    icon: Icon::ShieldCheck,
    accent: Accent::Emerald,
    title: "Access Rights",
    subtitle: "Manage user permissions",
    action: "Manage",
    destination: Destination::Access,
};

/// Every tile, in display order.
pub static TILES: [&Tile; 9] = [
    &MY_TRAININGS,
    &APPOINTMENTS,
    &CERTIFICATES,
    &DOCUMENTS,
    &PRESENTATION,
    &DEVICE_MANAGEMENT,
    &USER_MANAGEMENT,
    &EXAM_MANAGEMENT,
    &ACCESS_RIGHTS,
];

/// Tiles visible for `caps`, in catalogue order.
pub fn visible_tiles(caps: &Capabilities) -> impl Iterator<Item = &'static Tile> + '_ {
    TILES.iter().copied().filter(move |tile| tile.gate.allows(caps))
}
