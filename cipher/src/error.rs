use std::{error::Error, fmt::Display};

#[derive(Clone, Debug)]
pub enum CipherError {
    /// 数据长度和分组大小不匹配
    InvalidBlockSize { target: usize, real: usize },

    /// 不合法的密钥长度
    InvalidKeySize { target: usize, real: usize },

    /// 轮密钥个数不匹配
    InvalidRoundKeyCount { target: usize, real: usize },

    /// 访问越界
    InvalidIndex { index: usize, bound: usize },

    /// 未设置初始向量
    NotSetInitialVec,

    /// 输入/输出流错误
    Io(String),
}

impl Display for CipherError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidBlockSize { target, real } => f.write_fmt(format_args!(
                "Invalid block data size `{real}` not match to target size `{target}`"
            )),
            Self::InvalidKeySize { target, real } => f.write_fmt(format_args!(
                "Invalid key size `{real}` not match to target size `{target}`"
            )),
            Self::InvalidRoundKeyCount { target, real } => f.write_fmt(format_args!(
                "Invalid round key count `{real}` not match to target count `{target}`"
            )),
            Self::InvalidIndex { index, bound } => f.write_fmt(format_args!(
                "Invalid index `{index}` out of the bound `{bound}`"
            )),
            Self::NotSetInitialVec => f.write_str("Initial vector not set"),
            Self::Io(e) => f.write_fmt(format_args!("IO error: {e}")),
        }
    }
}

impl Error for CipherError {}

impl From<std::io::Error> for CipherError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value.to_string())
    }
}
