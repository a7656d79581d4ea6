pub trait BlockPadding {
    /// 对齐到`block_size`字节长度
    fn new(block_size: usize) -> Self;

    fn padding(&self, buf: &mut Vec<u8>);
}

/// PKCS#7填充: 每个填充字节的值为总填充字节数.
///
/// 长度已对齐时补一整块`block_size`, 保证填充总是存在且可无歧义去除.
#[derive(Copy, Clone, Debug)]
pub struct Pkcs7Padding {
    block_size: usize,
}

impl BlockPadding for Pkcs7Padding {
    fn new(block_size: usize) -> Self {
        Self { block_size }
    }

    fn padding(&self, buf: &mut Vec<u8>) {
        let count = self.block_size - (buf.len() % self.block_size);
        buf.resize(buf.len() + count, count as u8);
    }
}

#[derive(Copy, Clone, Debug)]
pub struct EmptyPadding;

impl BlockPadding for EmptyPadding {
    fn new(_block_size: usize) -> Self {
        Self
    }

    fn padding(&self, _buf: &mut Vec<u8>) {}
}
