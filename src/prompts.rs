pub const NAMING_SYSTEM: &str = include_str!("../data/prompts/naming_system.txt");
pub const NAMING_USER: &str = include_str!("../data/prompts/naming_user.txt");
