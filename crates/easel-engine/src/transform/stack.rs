use cgmath::{Matrix4, Rad, SquareMatrix, Vector3};

/// Model matrix type applied to primitives.
pub type Transform = Matrix4<f32>;

/// LIFO of saved transforms plus the current one.
#[derive(Debug, Clone)]
pub struct TransformStack {
    current: Transform,
    saved: Vec<Transform>,
}

impl TransformStack {
    pub fn new() -> Self {
        Self {
            current: Transform::identity(),
            saved: Vec::new(),
        }
    }

    /// Current transform.
    #[inline]
    pub fn current(&self) -> &Transform {
        &self.current
    }

    /// Number of saved transforms.
    #[inline]
    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    /// Saves a copy of the current transform.
    pub fn push(&mut self) {
        self.saved.push(self.current);
    }

    /// Restores the most recently saved transform.
    ///
    /// Returns `false` and leaves the current transform untouched when nothing
    /// was saved.
    pub fn pop(&mut self) -> bool {
        match self.saved.pop() {
            Some(t) => {
                self.current = t;
                true
            }
            None => false,
        }
    }

    pub fn translate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.current = self.current * Matrix4::from_translation(Vector3::new(dx, dy, dz));
    }

    pub fn rotate_x(&mut self, angle: f32) {
        self.current = self.current * Matrix4::from_angle_x(Rad(angle));
    }

    pub fn rotate_y(&mut self, angle: f32) {
        self.current = self.current * Matrix4::from_angle_y(Rad(angle));
    }

    pub fn rotate_z(&mut self, angle: f32) {
        self.current = self.current * Matrix4::from_angle_z(Rad(angle));
    }

    pub fn scale(&mut self, sx: f32, sy: f32, sz: f32) {
        self.current = self.current * Matrix4::from_nonuniform_scale(sx, sy, sz);
    }

    /// Resets the current transform to identity. Saved transforms are kept.
    pub fn reset(&mut self) {
        self.current = Transform::identity();
    }

    /// Starts a frame from a clean stack.
    ///
    /// Returns how many saved transforms the previous frame left behind; they
    /// are discarded and the current transform goes back to identity.
    pub fn begin_frame(&mut self) -> usize {
        let leaked = self.saved.len();
        self.saved.clear();
        self.current = Transform::identity();
        leaked
    }
}

impl Default for TransformStack {
    fn default() -> Self {
        Self::new()
    }
}
