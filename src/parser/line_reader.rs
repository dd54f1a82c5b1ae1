//! LineReader - 从 Reader 逐行读取报告
//!
//! 与 `BufRead::lines` 不同，这里保留行尾换行符（统计块需要原样输出），
//! 并对非 UTF-8 内容做有损解码，避免报告中个别异常字节中断整个处理。

use std::io::{self, BufRead};

/// 按行读取的迭代器，每项为包含行尾换行符的一行
///
/// # 类型参数
///
/// * `R` - 实现了 `BufRead` trait 的类型
pub struct LineReader<R: BufRead> {
    reader: R,
    buffer: Vec<u8>,
    finished: bool,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: Vec::with_capacity(1024),
            finished: false,
        }
    }

    /// 读取下一行，文件结束时返回 `None`
    fn read_line(&mut self) -> io::Result<Option<String>> {
        self.buffer.clear();
        let bytes_read = self.reader.read_until(b'\n', &mut self.buffer)?;

        if bytes_read == 0 {
            return Ok(None);
        }

        Ok(Some(String::from_utf8_lossy(&self.buffer).into_owned()))
    }
}

impl<R: BufRead> Iterator for LineReader<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.read_line() {
            Ok(Some(line)) => Some(Ok(line)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}
