/// zero the given slice.
///
/// We assume the compiler won't optimise out the call to this function
pub fn zero(to_zero: &mut [u8]) {
    // the unsafety of this call is bounded to the existence of the pointer
    // and the accuracy of the length of the array.
    //
    // since to_zero existence is bound to live at least as long as the call
    // of this function and that we use the length (in bytes) of the given
    // slice, this call is safe.
    unsafe { ::std::ptr::write_bytes(to_zero.as_mut_ptr(), 0, to_zero.len()) }
}

/// a heap allocated byte buffer which is zeroed when dropped.
///
/// Used to hold decoded seeds between the boundary and the master key
/// generation.
pub struct SecretBytes(Vec<u8>);
impl SecretBytes {
    pub fn new(bytes: Vec<u8>) -> Self {
        SecretBytes(bytes)
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
impl AsRef<[u8]> for SecretBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
impl Drop for SecretBytes {
    fn drop(&mut self) {
        zero(&mut self.0);
    }
}
