//! Byte-exact leaf node layout. All accessors operate in place on a page
//! buffer; nothing here copies the page.
//!
//! Only the leaf node kind is implemented. Internal nodes are an open
//! extension point: reaching one is a fatal error, not a silent no-op.

use crate::errors::Error;
use crate::row::ROW_SIZE;

pub const PAGE_SIZE: usize = 4096;
pub const TABLE_MAX_PAGES: usize = 100;

const NODE_TYPE_SIZE: usize = 1;
const NODE_TYPE_OFFSET: usize = 0;
const IS_ROOT_SIZE: usize = 1;
const IS_ROOT_OFFSET: usize = NODE_TYPE_OFFSET + NODE_TYPE_SIZE;
const PARENT_POINTER_SIZE: usize = 4;
const PARENT_POINTER_OFFSET: usize = IS_ROOT_OFFSET + IS_ROOT_SIZE;
pub const COMMON_NODE_HEADER_SIZE: usize = PARENT_POINTER_OFFSET + PARENT_POINTER_SIZE;

const LEAF_NODE_NUM_CELLS_SIZE: usize = 4;
const LEAF_NODE_NUM_CELLS_OFFSET: usize = COMMON_NODE_HEADER_SIZE;
pub const LEAF_NODE_HEADER_SIZE: usize = LEAF_NODE_NUM_CELLS_OFFSET + LEAF_NODE_NUM_CELLS_SIZE;

const LEAF_NODE_KEY_SIZE: usize = 4;
pub const LEAF_NODE_CELL_SIZE: usize = LEAF_NODE_KEY_SIZE + ROW_SIZE;
pub const LEAF_NODE_SPACE_FOR_CELLS: usize = PAGE_SIZE - LEAF_NODE_HEADER_SIZE;
pub const LEAF_NODE_MAX_CELLS: usize = LEAF_NODE_SPACE_FOR_CELLS / LEAF_NODE_CELL_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    Leaf,
    Internal,
}

impl NodeType {
    fn from_byte(b: u8) -> Result<NodeType, Error> {
        match b {
            0 => Ok(NodeType::Leaf),
            1 => Ok(NodeType::Internal),
            other => Err(Error::Fatal(format!("corrupt node type byte: {other}"))),
        }
    }

    fn to_byte(self) -> u8 {
        match self {
            NodeType::Leaf => 0,
            NodeType::Internal => 1,
        }
    }
}

pub type Page = [u8; PAGE_SIZE];

pub fn node_type(page: &Page) -> Result<NodeType, Error> {
    NodeType::from_byte(page[NODE_TYPE_OFFSET])
}

pub fn set_node_type(page: &mut Page, t: NodeType) {
    page[NODE_TYPE_OFFSET] = t.to_byte();
}

pub fn set_is_root(page: &mut Page, value: bool) {
    page[IS_ROOT_OFFSET] = value as u8;
}

fn cell_offset(cell_num: usize) -> Result<usize, Error> {
    if cell_num >= LEAF_NODE_MAX_CELLS {
        return Err(Error::Fatal(format!(
            "cell index {cell_num} out of bounds (max {LEAF_NODE_MAX_CELLS})"
        )));
    }
    Ok(LEAF_NODE_HEADER_SIZE + cell_num * LEAF_NODE_CELL_SIZE)
}

pub fn num_cells(page: &Page) -> u32 {
    u32::from_le_bytes(
        page[LEAF_NODE_NUM_CELLS_OFFSET..LEAF_NODE_NUM_CELLS_OFFSET + LEAF_NODE_NUM_CELLS_SIZE]
            .try_into()
            .unwrap(),
    )
}

pub fn set_num_cells(page: &mut Page, n: u32) {
    page[LEAF_NODE_NUM_CELLS_OFFSET..LEAF_NODE_NUM_CELLS_OFFSET + LEAF_NODE_NUM_CELLS_SIZE]
        .copy_from_slice(&n.to_le_bytes());
}

pub fn key(page: &Page, cell_num: usize) -> Result<u32, Error> {
    let off = cell_offset(cell_num)?;
    Ok(u32::from_le_bytes(
        page[off..off + LEAF_NODE_KEY_SIZE].try_into().unwrap(),
    ))
}

pub fn set_key(page: &mut Page, cell_num: usize, key: u32) -> Result<(), Error> {
    let off = cell_offset(cell_num)?;
    page[off..off + LEAF_NODE_KEY_SIZE].copy_from_slice(&key.to_le_bytes());
    Ok(())
}

pub fn value(page: &Page, cell_num: usize) -> Result<&[u8], Error> {
    let off = cell_offset(cell_num)? + LEAF_NODE_KEY_SIZE;
    Ok(&page[off..off + ROW_SIZE])
}

pub fn value_mut(page: &mut Page, cell_num: usize) -> Result<&mut [u8], Error> {
    let off = cell_offset(cell_num)? + LEAF_NODE_KEY_SIZE;
    Ok(&mut page[off..off + ROW_SIZE])
}

/// Copies whole cells `[from, from+count)` to start at `to`. Used to shift
/// cells right by one slot on insert; copies back-to-front so overlapping
/// ranges don't corrupt data.
pub fn copy_cell(page: &mut Page, from: usize, to: usize) -> Result<(), Error> {
    let src = cell_offset(from)?;
    let dst = cell_offset(to)?;
    let mut cell = [0u8; LEAF_NODE_CELL_SIZE];
    cell.copy_from_slice(&page[src..src + LEAF_NODE_CELL_SIZE]);
    page[dst..dst + LEAF_NODE_CELL_SIZE].copy_from_slice(&cell);
    Ok(())
}

pub fn init_leaf(page: &mut Page) {
    set_node_type(page, NodeType::Leaf);
    set_is_root(page, false);
    set_num_cells(page, 0);
}
