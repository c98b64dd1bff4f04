pub struct Icons;

impl Icons {
    pub const NOTE: &str = "📝";
    pub const CHECK: &str = "✅";
    pub const CROSS: &str = "❌";
    pub const EMPTY: &str = "∅";
}
