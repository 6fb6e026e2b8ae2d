use bytemuck::{Pod, Zeroable};

/// Per-glyph packed fade state. Four layout vertices of a quad share one
/// entry; the shader re-expands the four bytes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OpacityVertexArray {
    data: Vec<u32>,
}

impl OpacityVertexArray {
    pub fn clear(&mut self) {
        self.data.clear();
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn push_repeated(&mut self, packed: u32, count: usize) {
        self.data.extend(std::iter::repeat_n(packed, count));
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.data
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }
}

/// One row of the collision debug overlay. Quads get four identical rows.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct CollisionVertex {
    pub placed: u16,
    pub not_used: u16,
    pub shift_x: f32,
    pub shift_y: f32,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CollisionVertexArray {
    data: Vec<CollisionVertex>,
}

impl CollisionVertexArray {
    pub fn clear(&mut self) {
        self.data.clear();
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Emit the four identical rows covering one quad.
    pub fn push_quad(&mut self, placed: bool, not_used: bool, shift_x: f32, shift_y: f32) {
        let row = CollisionVertex {
            placed: u16::from(placed),
            not_used: u16::from(not_used),
            shift_x,
            shift_y,
        };
        self.data.extend([row; 4]);
    }

    pub fn as_slice(&self) -> &[CollisionVertex] {
        &self.data
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }
}
