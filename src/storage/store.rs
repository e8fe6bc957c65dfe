use serde::Serialize;
use serde::de::DeserializeOwned;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::error::AppResult;

/// 本地 JSON 键值存储
///
/// 每个键对应数据目录下的一个 `<key>.json` 文件,保存时整体覆写。
/// 读取对缺失和损坏的文件都宽容:退回类型默认值,不阻塞启动。
#[derive(Clone)]
pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// 读取一个集合,缺失或损坏时返回默认值
    pub async fn load<T>(&self, key: &str) -> T
    where
        T: DeserializeOwned + Default,
    {
        let path = self.path_for(key);
        match tokio::fs::read(&path).await {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(value) => value,
                Err(e) => {
                    log::warn!("Malformed data for key '{key}', falling back to default: {e}");
                    T::default()
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => T::default(),
            Err(e) => {
                log::warn!("Failed to read key '{key}', falling back to default: {e}");
                T::default()
            }
        }
    }

    /// 整体覆写一个集合
    pub async fn save<T: Serialize>(&self, key: &str, value: &T) -> AppResult<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let bytes = serde_json::to_vec_pretty(value)?;
        tokio::fs::write(self.path_for(key), bytes).await?;
        Ok(())
    }
}
