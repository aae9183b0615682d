// ==========================================
// 值班排班系统 - 岗位 JSON 读写
// ==========================================
// 格式: Slot 数组（date 为 "DD/MM"）
// ==========================================

use crate::domain::slot::Slot;
use crate::importer::error::{ImportError, ImportResult};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::debug;

pub struct SlotJsonLoader;

impl SlotJsonLoader {
    pub fn load(path: &Path) -> ImportResult<Vec<Slot>> {
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        let file = File::open(path)?;
        let slots: Vec<Slot> = serde_json::from_reader(BufReader::new(file))?;
        debug!(path = %path.display(), count = slots.len(), "岗位文件读取完成");
        Ok(slots)
    }

    pub fn save(path: &Path, slots: &[Slot]) -> ImportResult<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, slots)?;
        writer.flush()?;
        debug!(path = %path.display(), count = slots.len(), "岗位文件写入完成");
        Ok(())
    }
}
