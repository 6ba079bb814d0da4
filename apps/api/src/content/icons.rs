//! Closed icon sets for experience cards and skills.
//!
//! Records store the icon as a free-form key so that older or hand-edited
//! content still loads. Rendering always goes through `resolve`, which is
//! total: unknown keys land on the set's fallback icon.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ExperienceIcon {
    Briefcase,
    Graduation,
    Award,
    Trophy,
    Star,
    Lightbulb,
    Target,
    Rocket,
    Shield,
    Building,
    Calendar,
    Book,
    Heart,
    Coffee,
    User,
    Zap,
    Globe,
    Users,
    Trending,
    BookOpen,
    MapPin,
    Clock,
    Check,
    Alert,
    Home,
    School,
}

impl ExperienceIcon {
    pub const FALLBACK: ExperienceIcon = ExperienceIcon::Briefcase;

    pub fn from_key(key: &str) -> Option<Self> {
        use ExperienceIcon::*;
        let icon = match key {
            "briefcase" => Briefcase,
            "graduation" => Graduation,
            "award" => Award,
            "trophy" => Trophy,
            "star" => Star,
            "lightbulb" => Lightbulb,
            "target" => Target,
            "rocket" => Rocket,
            "shield" => Shield,
            "building" => Building,
            "calendar" => Calendar,
            "book" => Book,
            "heart" => Heart,
            "coffee" => Coffee,
            "user" => User,
            "zap" => Zap,
            "globe" => Globe,
            "users" => Users,
            "trending" => Trending,
            "bookOpen" => BookOpen,
            "mapPin" => MapPin,
            "clock" => Clock,
            "check" => Check,
            "alert" => Alert,
            "home" => Home,
            "school" => School,
            _ => return None,
        };
        Some(icon)
    }

    pub fn resolve(key: &str) -> Self {
        Self::from_key(key).unwrap_or(Self::FALLBACK)
    }

    /// Name of the glyph component the front end draws for this icon.
    pub fn glyph(&self) -> &'static str {
        use ExperienceIcon::*;
        match self {
            Briefcase => "Briefcase",
            Graduation => "GraduationCap",
            Award => "Award",
            Trophy => "Trophy",
            Star => "Star",
            Lightbulb => "Lightbulb",
            Target => "Target",
            Rocket => "Rocket",
            Shield => "Shield",
            Building => "Building",
            Calendar => "Calendar",
            Book => "Book",
            Heart => "Heart",
            Coffee => "Coffee",
            User => "User",
            Zap => "Zap",
            Globe => "Globe",
            Users => "Users",
            Trending => "TrendingUp",
            BookOpen => "BookOpen",
            MapPin => "MapPin",
            Clock => "Clock",
            Check => "CheckCircle",
            Alert => "AlertCircle",
            Home => "Home",
            School => "School",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SkillIcon {
    Trophy,
    Sparkles,
    Target,
    Rocket,
    Star,
    Zap,
    Lightbulb,
    Brain,
    Code,
    Database,
    Palette,
    Megaphone,
    BarChart,
    LineChart,
    PieChart,
    Activity,
    Cpu,
    Layers,
    Package,
    Server,
    Smartphone,
    Monitor,
    Wifi,
    Cloud,
    Lock,
    Key,
    Eye,
    Search,
    Filter,
    Edit,
    FileText,
    FolderOpen,
    GitBranch,
    Hash,
    Inbox,
    Send,
    MessageSquare,
    Music,
    Camera,
    Video,
    Mic,
    Volume,
    Headphones,
    Radio,
    Heart,
    Shield,
    Globe,
    Users,
}

impl SkillIcon {
    pub const FALLBACK: SkillIcon = SkillIcon::Trophy;

    pub fn from_key(key: &str) -> Option<Self> {
        use SkillIcon::*;
        let icon = match key {
            "trophy" => Trophy,
            "sparkles" => Sparkles,
            "target" => Target,
            "rocket" => Rocket,
            "star" => Star,
            "zap" => Zap,
            "lightbulb" => Lightbulb,
            "brain" => Brain,
            "code" => Code,
            "database" => Database,
            "palette" => Palette,
            "megaphone" => Megaphone,
            "barChart" => BarChart,
            "lineChart" => LineChart,
            "pieChart" => PieChart,
            "activity" => Activity,
            "cpu" => Cpu,
            "layers" => Layers,
            "package" => Package,
            "server" => Server,
            "smartphone" => Smartphone,
            "monitor" => Monitor,
            "wifi" => Wifi,
            "cloud" => Cloud,
            "lock" => Lock,
            "key" => Key,
            "eye" => Eye,
            "search" => Search,
            "filter" => Filter,
            "edit" => Edit,
            "fileText" => FileText,
            "folderOpen" => FolderOpen,
            "gitBranch" => GitBranch,
            "hash" => Hash,
            "inbox" => Inbox,
            "send" => Send,
            "messageSquare" => MessageSquare,
            "music" => Music,
            "camera" => Camera,
            "video" => Video,
            "mic" => Mic,
            "volume" => Volume,
            "headphones" => Headphones,
            "radio" => Radio,
            "heart" => Heart,
            "shield" => Shield,
            "globe" => Globe,
            "users" => Users,
            _ => return None,
        };
        Some(icon)
    }

    pub fn resolve(key: &str) -> Self {
        Self::from_key(key).unwrap_or(Self::FALLBACK)
    }

    pub fn glyph(&self) -> &'static str {
        use SkillIcon::*;
        match self {
            Trophy => "Trophy",
            Sparkles => "Sparkles",
            Target => "Target",
            Rocket => "Rocket",
            Star => "Star",
            Zap => "Zap",
            Lightbulb => "Lightbulb",
            Brain => "Brain",
            Code => "Code",
            Database => "Database",
            Palette => "Palette",
            Megaphone => "Megaphone",
            BarChart => "BarChart3",
            LineChart => "LineChart",
            PieChart => "PieChart",
            Activity => "Activity",
            Cpu => "Cpu",
            Layers => "Layers",
            Package => "Package",
            Server => "Server",
            Smartphone => "Smartphone",
            Monitor => "Monitor",
            Wifi => "Wifi",
            Cloud => "Cloud",
            Lock => "Lock",
            Key => "Key",
            Eye => "Eye",
            Search => "Search",
            Filter => "Filter",
            Edit => "Edit",
            FileText => "FileText",
            FolderOpen => "FolderOpen",
            GitBranch => "GitBranch",
            Hash => "Hash",
            Inbox => "Inbox",
            Send => "Send",
            MessageSquare => "MessageSquare",
            Music => "Music",
            Camera => "Camera",
            Video => "Video",
            Mic => "Mic",
            Volume => "Volume2",
            Headphones => "Headphones",
            Radio => "Radio",
            Heart => "Heart",
            Shield => "Shield",
            Globe => "Globe",
            Users => "Users",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_experience_keys_resolve() {
        assert_eq!(ExperienceIcon::resolve("graduation"), ExperienceIcon::Graduation);
        assert_eq!(ExperienceIcon::resolve("bookOpen"), ExperienceIcon::BookOpen);
        assert_eq!(ExperienceIcon::Graduation.glyph(), "GraduationCap");
    }

    #[test]
    fn test_unknown_experience_key_falls_back() {
        assert_eq!(ExperienceIcon::from_key("doesNotExist"), None);
        assert_eq!(ExperienceIcon::resolve("doesNotExist"), ExperienceIcon::Briefcase);
        assert_eq!(ExperienceIcon::resolve(""), ExperienceIcon::Briefcase);
    }

    #[test]
    fn test_keys_are_case_sensitive() {
        assert_eq!(ExperienceIcon::from_key("Briefcase"), None);
        assert_eq!(SkillIcon::from_key("barchart"), None);
    }

    #[test]
    fn test_skill_keys_resolve_and_fall_back() {
        assert_eq!(SkillIcon::resolve("barChart"), SkillIcon::BarChart);
        assert_eq!(SkillIcon::BarChart.glyph(), "BarChart3");
        assert_eq!(SkillIcon::resolve("briefcase"), SkillIcon::Trophy);
    }

    #[test]
    fn test_serialized_names_match_keys() {
        assert_eq!(
            serde_json::to_value(ExperienceIcon::MapPin).unwrap(),
            serde_json::json!("mapPin")
        );
        assert_eq!(
            serde_json::to_value(SkillIcon::MessageSquare).unwrap(),
            serde_json::json!("messageSquare")
        );
    }
}
