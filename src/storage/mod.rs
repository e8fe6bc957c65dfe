pub mod store;

pub use store::JsonStore;

/// 存储键名(沿用桌面端既有的数据文件名)
pub mod keys {
    pub const PARTICIPANTS: &str = "lottery-participants";
    pub const PRIZES: &str = "lottery-prizes";
    pub const WINNERS: &str = "winners";
    pub const DRAW_ORDER: &str = "lottery-draw-order";
}
