mod fixups;
mod naming;
mod notation;
mod pipeline;
