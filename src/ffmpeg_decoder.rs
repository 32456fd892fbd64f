use anyhow::{Result, anyhow};
use audrey::Reader;
use ffmpeg_sidecar::command::FfmpegCommand;
use std::path::Path;
use tempfile::NamedTempFile;

pub(crate) fn path_str(path: &Path) -> Result<&str> {
    path.to_str()
        .ok_or_else(|| anyhow!("invalid path {:?}", path))
}

/// Runs an ffmpeg command to completion, failing with ffmpeg's own error
/// lines when it exits unsuccessfully.
pub(crate) fn run(command: &mut FfmpegCommand) -> Result<()> {
    let mut child = command.spawn()?;
    let errors: Vec<String> = child.iter()?.filter_errors().collect();
    let status = child.wait()?;

    if status.success() {
        return Ok(());
    }

    if errors.is_empty() {
        Err(anyhow!("ffmpeg exited with {}", status))
    } else {
        Err(anyhow!("ffmpeg exited with {}: {}", status, errors.join("; ")))
    }
}

// ffmpeg -i input.mp3 -ar 16000 -ac 1 -c:a pcm_s16le output.wav
fn to_wav(input_path: &Path) -> Result<NamedTempFile> {
    log::debug!("Converting {:?} to 16 kHz mono wav", input_path);

    let temp_file = NamedTempFile::with_suffix(".wav")?;

    let mut command = FfmpegCommand::new();
    command
        .hide_banner()
        .overwrite()
        .input(path_str(input_path)?)
        .args(["-ar", "16000", "-ac", "1", "-c:a", "pcm_s16le"])
        .output(path_str(temp_file.path())?);
    run(&mut command)?;

    Ok(temp_file)
}

/// Decodes any audio file ffmpeg understands into 16 kHz mono samples.
pub fn read_file<P: AsRef<Path>>(audio_file_path: P) -> Result<Vec<f32>> {
    let temp_file = to_wav(audio_file_path.as_ref())?;

    let mut reader = Reader::new(temp_file.reopen()?)?;
    let audio_buf: Vec<i16> = reader.samples().collect::<Result<_, _>>()?;
    let mut output = vec![0.0f32; audio_buf.len()];

    whisper_rs::convert_integer_to_float_audio(&audio_buf, &mut output)?;
    Ok(output)
    // temp_file is deleted when it goes out of scope here
}
