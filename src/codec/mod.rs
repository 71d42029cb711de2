// Codec module - container decode and WAV serialization
//
// Decoding is container-sniffed: WAV via hound, FLAC via claxon, everything
// else is handed to symphonia (MP3). Export is always canonical 16-bit PCM
// WAV; compressed export formats are out of scope.

pub mod decode;
pub mod wav;

pub use decode::decode_bytes;
pub use wav::encode_wav;
